//! Thermogauge firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod pins;

// Hardware-facing modules are written against embedded-hal traits, so
// they build on the host too; the simulated bus in `sensors::sim` backs
// them in tests.
pub mod adapters;
pub mod drivers;
pub mod sensors;
