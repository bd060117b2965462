//! Unified error types for the thermogauge firmware.
//!
//! A single `Copy` error enum that configuration and peripheral bring-up
//! convert into, so the startup path can report failures uniformly.  The
//! control loop itself has no error channel: an open thermocouple is an
//! ordinary [`Reading`](crate::sensors::thermocouple::Reading), not an
//! `Err`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible bring-up step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral or collaborator initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor faults
// ---------------------------------------------------------------------------

/// Faults the converter can flag in its status bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    /// Thermocouple input is open (lead disconnected).
    OpenCircuit,
}

impl SensorFault {
    /// Text shown in place of a numeric reading.
    pub const fn display_text(self) -> &'static str {
        match self {
            Self::OpenCircuit => "not connected",
        }
    }
}

impl fmt::Display for SensorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenCircuit => write!(f, "thermocouple open circuit"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
