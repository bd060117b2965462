//! Port traits — the hexagonal boundary between the control loop and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (converter link, motor output, display, input, event
//! sinks) implement these traits.  The
//! [`ControlLoop`](super::control_loop::ControlLoop) consumes them via
//! generics at each call site, so the domain core never touches hardware
//! directly.

use crate::sensors::thermocouple::RawSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one converter transaction per call.
///
/// Infallible by contract.  Validity of the frame is judged by the
/// decoder, not by the link.
pub trait SensorPort {
    fn read_raw(&mut self) -> RawSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the motor output.
pub trait ActuatorPort {
    /// One bounded pulse: assert, hold, deassert.  Returns with the
    /// output deasserted.
    fn pulse(&mut self);

    /// Force the output deasserted.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → UI library)
// ───────────────────────────────────────────────────────────────

/// What the UI needs to draw; nothing about how it is drawn.
pub trait DisplayPort {
    /// Show a bounded temperature in whole degrees Celsius.
    fn show_temperature(&mut self, celsius: u16);

    /// Replace the numeric reading with the "not connected" indication.
    fn show_not_connected(&mut self);

    /// Reflect whether the actuator is requested.
    fn show_actuator(&mut self, on: bool);

    /// Called once at the end of every loop iteration so a renderer can
    /// draw whatever changed.  No-op by default.
    fn refresh(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Input port (driving adapter: UI → domain)
// ───────────────────────────────────────────────────────────────

/// Source of the operator's actuator request.  Read once per iteration;
/// must not block.
pub trait InputPort {
    fn actuator_requested(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot, wrapping at `u32::MAX`.
pub trait MonotonicClock {
    fn now_ms(&self) -> u32;
}
