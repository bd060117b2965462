//! Hardware adapter — bridges the converter link and the motor output to
//! the domain port traits.
//!
//! The control loop takes one `hw` argument that is both a
//! [`SensorPort`] and an [`ActuatorPort`]; this adapter packages any pair
//! of implementations into that shape.  On the device the pair is a
//! [`Max6675`](crate::sensors::max6675::Max6675) and a
//! [`PulseActuator`](crate::drivers::actuator::PulseActuator) built from
//! `esp-idf-hal` pin drivers; on the host, simulated pins.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::sensors::thermocouple::RawSample;

/// Concrete adapter that combines sensor and actuator behind port traits.
pub struct HardwareAdapter<S, A> {
    sensor: S,
    actuator: A,
}

impl<S, A> HardwareAdapter<S, A> {
    pub fn new(sensor: S, actuator: A) -> Self {
        Self { sensor, actuator }
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort, A> SensorPort for HardwareAdapter<S, A> {
    fn read_raw(&mut self) -> RawSample {
        self.sensor.read_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, A: ActuatorPort> ActuatorPort for HardwareAdapter<S, A> {
    fn pulse(&mut self) {
        self.actuator.pulse();
    }

    fn all_off(&mut self) {
        self.actuator.all_off();
    }
}
