//! Timing and range primitives used by the control loop.

pub mod range;
pub mod timer;
