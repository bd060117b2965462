//! Bit-banged MAX6675 link (chip select, clock, data).
//!
//! The converter sits on traces shared with the display panel, so the
//! hardware SPI peripheral is never claimed; every edge is driven from
//! software through plain GPIO.
//!
//! ## Transaction
//!
//! ```text
//!  CS  ‾‾\____________________________________/‾‾
//!  SCK ____/‾\_/‾\_/‾\_ ... _/‾\_______________
//!  SO      D15 D14 D13      D0      (sampled while SCK high)
//! ```
//!
//! The settle delay is busy-waited on purpose: the converter's minimum
//! clock-high time is a few hundred nanoseconds and must not be stretched
//! by a scheduler.
//!
//! ## Caller discipline
//!
//! One conversion takes up to 220 ms.  Reading faster than the poll
//! period returns stale frames, or aborts the running conversion; the
//! control loop's sensor timer is what keeps this in bounds.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::thermocouple::RawSample;
use crate::app::ports::SensorPort;
use crate::config::ControllerConfig;

/// Bits clocked per transaction.
pub const FRAME_BITS: u8 = 16;

/// Edge timing for the link, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTiming {
    /// Hold after each clock edge.  Never below 1 µs.
    pub settle_us: u32,
    /// Hold between asserting chip select and the first rising edge.
    pub cs_setup_us: u32,
}

impl LinkTiming {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            settle_us: config.clock_settle_us.max(1),
            cs_setup_us: config.cs_setup_us,
        }
    }
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

pub struct Max6675<CS, SCK, SO, D> {
    cs: CS,
    sck: SCK,
    so: SO,
    delay: D,
    timing: LinkTiming,
}

impl<CS, SCK, SO, D> Max6675<CS, SCK, SO, D>
where
    CS: OutputPin,
    SCK: OutputPin,
    SO: InputPin,
    D: DelayNs,
{
    /// Wrap already-configured pins.  `cs` and `sck` must be outputs and
    /// `so` an input; call [`begin`](Self::begin) before the first read.
    pub fn new(cs: CS, sck: SCK, so: SO, delay: D, timing: LinkTiming) -> Self {
        Self {
            cs,
            sck,
            so,
            delay,
            timing: LinkTiming {
                settle_us: timing.settle_us.max(1),
                ..timing
            },
        }
    }

    /// Drive the idle levels: chip select deasserted (HIGH), clock LOW.
    pub fn begin(&mut self) {
        // GPIO writes on a configured pin do not fail in practice; a
        // failed edge shows up as a garbled frame, judged downstream.
        let _ = self.cs.set_high();
        let _ = self.sck.set_low();
    }

    /// Clock one 16-bit frame out of the converter, MSB first.
    pub fn read_raw(&mut self) -> RawSample {
        let settle = self.timing.settle_us;

        let _ = self.cs.set_low();
        self.delay.delay_us(self.timing.cs_setup_us);

        let mut v: u16 = 0;
        for _ in 0..FRAME_BITS {
            let _ = self.sck.set_high();
            self.delay.delay_us(settle);
            // An unreadable line samples as 0.
            let bit = self.so.is_high().unwrap_or(false);
            v = (v << 1) | u16::from(bit);
            let _ = self.sck.set_low();
            self.delay.delay_us(settle);
        }

        let _ = self.cs.set_high();
        RawSample(v)
    }

    pub fn timing(&self) -> LinkTiming {
        self.timing
    }

    /// Give the pins and delay back (e.g. to re-strap a shared pad).
    pub fn release(self) -> (CS, SCK, SO, D) {
        (self.cs, self.sck, self.so, self.delay)
    }
}

impl<CS, SCK, SO, D> SensorPort for Max6675<CS, SCK, SO, D>
where
    CS: OutputPin,
    SCK: OutputPin,
    SO: InputPin,
    D: DelayNs,
{
    fn read_raw(&mut self) -> RawSample {
        Max6675::read_raw(self)
    }
}
