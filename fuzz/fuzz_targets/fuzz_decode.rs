//! Fuzz target: `thermocouple::decode` → `clamp_celsius`
//!
//! Feeds arbitrary frames through the decoder and the display clamp and
//! asserts the fault bit always wins, readings are never negative and the
//! clamped value never leaves the configured range.
//!
//! cargo fuzz run fuzz_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermogauge::control::range::clamp_celsius;
use thermogauge::sensors::thermocouple::{decode, RawSample, Reading};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let raw = RawSample(u16::from_be_bytes([data[0], data[1]]));
    let max_c = u16::from_be_bytes([data[2], data[3]]).max(1);

    match decode(raw) {
        Reading::Fault(_) => assert!(raw.is_open_circuit()),
        Reading::Celsius(c) => {
            assert!(!raw.is_open_circuit());
            assert!(c >= 0.0, "decoded negative temperature {c}");
            assert!(clamp_celsius(c, max_c) <= max_c);
        }
    }

    // Pure: a second decode agrees.
    assert_eq!(decode(raw), decode(raw));
});
