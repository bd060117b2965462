//! Thermocouple acquisition.
//!
//! [`max6675`] clocks raw frames over bit-banged GPIO; [`thermocouple`]
//! turns a frame into a [`Reading`](thermocouple::Reading).  The two are
//! kept apart so decoding stays a pure function of the frame.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the link is built from `esp-idf-hal` pin drivers in main.
//! On host/test: [`sim`] provides a simulated converter behind the same
//! embedded-hal traits.

pub mod max6675;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
pub mod thermocouple;
