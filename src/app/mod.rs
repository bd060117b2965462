//! Application core — the control loop and its port boundary.
//!
//! Everything here is hardware-agnostic.  Sensors, the motor output, the
//! display and user input are reached only through the **port traits** in
//! [`ports`], so the whole loop runs on the host against mocks.

pub mod control_loop;
pub mod events;
pub mod ports;
pub mod state;
