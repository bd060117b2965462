//! MAX6675 frame decoding (K-type thermocouple, 0.25 °C resolution).
//!
//! ## Frame layout (16 bits, MSB first)
//!
//! | Bits  | Meaning                                   |
//! |-------|-------------------------------------------|
//! | 15    | dummy sign bit, always 0                  |
//! | 14..3 | 12-bit temperature, 0.25 °C per LSB       |
//! | 2     | thermocouple input open                   |
//! | 1     | device ID, always 0                       |
//! | 0     | three-state                               |
//!
//! Any change to these constants silently changes resolution.

use crate::error::SensorFault;

/// Status bit set by the converter when the thermocouple is disconnected.
pub const OPEN_CIRCUIT_MASK: u16 = 0x0004;
/// Low bits (status, ID, three-state) discarded before scaling.
pub const DATA_SHIFT: u32 = 3;
/// Degrees Celsius per LSB of the 12-bit temperature field.
pub const CELSIUS_PER_LSB: f32 = 0.25;

/// One 16-bit frame clocked out of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample(pub u16);

impl RawSample {
    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_open_circuit(self) -> bool {
        self.0 & OPEN_CIRCUIT_MASK != 0
    }
}

impl From<u16> for RawSample {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// A decoded frame: a usable temperature or an explicit fault, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Celsius(f32),
    Fault(SensorFault),
}

impl Reading {
    pub fn celsius(self) -> Option<f32> {
        match self {
            Self::Celsius(c) => Some(c),
            Self::Fault(_) => None,
        }
    }

    pub fn is_fault(self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

/// Interpret a raw frame.  Pure: same input, same output.
pub fn decode(raw: RawSample) -> Reading {
    if raw.is_open_circuit() {
        return Reading::Fault(SensorFault::OpenCircuit);
    }
    let counts = raw.bits() >> DATA_SHIFT;
    Reading::Celsius(f32::from(counts) * CELSIUS_PER_LSB)
}
