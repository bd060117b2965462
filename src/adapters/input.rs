//! Operator input: the actuator request flag and a push-button source.
//!
//! The flag is written from whatever context the UI library runs its tap
//! callbacks in, and read once per loop iteration, so it is an atomic
//! rather than a plain `bool`.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;
use log::info;

use crate::app::ports::InputPort;

/// Lock-free on/off request shared between a tap handler and the loop.
#[derive(Debug, Default)]
pub struct ActuatorRequest {
    on: AtomicBool,
}

impl ActuatorRequest {
    pub const fn new() -> Self {
        Self {
            on: AtomicBool::new(false),
        }
    }

    /// Flip the request and return the new value.  Safe from callbacks.
    pub fn toggle(&self) -> bool {
        !self.on.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn set(&self, on: bool) {
        self.on.store(on, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }
}

impl InputPort for &ActuatorRequest {
    fn actuator_requested(&mut self) -> bool {
        self.get()
    }
}

/// Active-low push button that toggles an [`ActuatorRequest`] on each
/// debounced press.
///
/// Sampled once per loop iteration; a level must be seen on two
/// consecutive samples before it counts, which at the 5 ms idle cadence
/// rejects contact bounce without timers.
pub struct TapButton<'a, P> {
    pin: P,
    request: &'a ActuatorRequest,
    last_sample: bool,
    stable_pressed: bool,
}

impl<'a, P: InputPin> TapButton<'a, P> {
    pub fn new(pin: P, request: &'a ActuatorRequest) -> Self {
        Self {
            pin,
            request,
            last_sample: false,
            stable_pressed: false,
        }
    }

    /// Sample the pin; toggles the request on a debounced press edge.
    pub fn poll(&mut self) {
        // Unreadable pin reads as released.
        let pressed = self.pin.is_low().unwrap_or(false);
        if pressed == self.last_sample && pressed != self.stable_pressed {
            self.stable_pressed = pressed;
            if pressed {
                let on = self.request.toggle();
                info!("input: actuator request -> {}", if on { "ON" } else { "OFF" });
            }
        }
        self.last_sample = pressed;
    }
}

impl<P: InputPin> InputPort for TapButton<'_, P> {
    fn actuator_requested(&mut self) -> bool {
        self.poll();
        self.request.get()
    }
}
