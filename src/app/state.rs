//! Process-wide control state.
//!
//! [`ControlState`] has exactly one writer, the control loop.  Readers on
//! other contexts go through [`SharedControlState`], which only ever
//! hands out a whole, consistent copy.

use core::cell::Cell;

use critical_section::Mutex;

/// Snapshot of everything the collaborators observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Last good reading, rounded and clamped to the display range (°C).
    pub current_temperature: u16,
    /// Operator wants the motor pulsed.
    pub actuator_requested: bool,
    /// False from an open-circuit poll until the next good one.
    pub sensor_connected: bool,
}

impl ControlState {
    pub const INITIAL: Self = Self {
        current_temperature: 0,
        actuator_requested: false,
        sensor_connected: true,
    };
}

impl Default for ControlState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Interrupt-safe publication slot for [`ControlState`].
pub struct SharedControlState {
    inner: Mutex<Cell<ControlState>>,
}

impl SharedControlState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(ControlState::INITIAL)),
        }
    }

    /// Replace the published state.  Called by the control loop only.
    pub fn publish(&self, state: ControlState) {
        critical_section::with(|cs| self.inner.borrow(cs).set(state));
    }

    pub fn snapshot(&self) -> ControlState {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for SharedControlState {
    fn default() -> Self {
        Self::new()
    }
}
