//! Outbound application events.
//!
//! The [`ControlLoop`](super::control_loop::ControlLoop) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::error::SensorFault;
use crate::sensors::thermocouple::{RawSample, Reading};

use super::state::ControlState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The loop has started (carries the initial state).
    Started(ControlState),

    /// One converter transaction completed.  Emitted for every poll.
    Sample { raw: RawSample, reading: Reading },

    /// A new bounded temperature was published.
    TemperatureUpdated(u16),

    /// The sensor went from connected to faulted.
    SensorFault(SensorFault),

    /// A good reading arrived after a fault.
    SensorRecovered,

    /// The operator toggled the actuator request.
    ActuatorRequestChanged(bool),
}
