//! Renderer-agnostic display model.
//!
//! The UI library that actually draws the dial lives outside this crate.
//! [`gauge::GaugeView`] is what it reads: numbers and enums, no widgets.

pub mod gauge;
