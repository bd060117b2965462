//! Output drivers and peripheral bring-up helpers.

pub mod actuator;
pub mod touch_reset;
