//! Motor driver input, pulsed.
//!
//! The motor driver expects a train of short HIGH pulses rather than a
//! level, so this driver never leaves the line asserted: every
//! [`pulse`](PulseActuator::pulse) returns with the output LOW.
//!
//! ## Timing
//!
//! One pulse holds HIGH for `high_ms`, then LOW for `low_ms`, both
//! blocking.  [`ControllerConfig::validate`] guarantees the pair fits in
//! one actuator period.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::ActuatorPort;
use crate::config::ControllerConfig;

pub struct PulseActuator<P, D> {
    pin: P,
    delay: D,
    high_ms: u32,
    low_ms: u32,
    pulses: u32,
}

impl<P: OutputPin, D: DelayNs> PulseActuator<P, D> {
    /// Take the pin and drive it LOW immediately.
    pub fn new(pin: P, delay: D, high_ms: u32, low_ms: u32) -> Self {
        let mut act = Self {
            pin,
            delay,
            high_ms,
            low_ms,
            pulses: 0,
        };
        act.off();
        act
    }

    pub fn from_config(pin: P, delay: D, config: &ControllerConfig) -> Self {
        Self::new(pin, delay, config.pulse_high_ms, config.pulse_low_ms)
    }

    pub fn pulse(&mut self) {
        let _ = self.pin.set_high();
        self.delay.delay_ms(self.high_ms);
        let _ = self.pin.set_low();
        self.delay.delay_ms(self.low_ms);
        self.pulses = self.pulses.wrapping_add(1);
        if self.pulses % 100 == 0 {
            debug!("motor: {} pulses", self.pulses);
        }
    }

    pub fn off(&mut self) {
        let _ = self.pin.set_low();
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Bounded time one pulse blocks the loop, saturating at `u32::MAX`.
    pub fn pulse_duration_ms(&self) -> u32 {
        self.high_ms.saturating_add(self.low_ms)
    }
}

impl<P: OutputPin, D: DelayNs> ActuatorPort for PulseActuator<P, D> {
    fn pulse(&mut self) {
        PulseActuator::pulse(self);
    }

    fn all_off(&mut self) {
        self.off();
    }
}
