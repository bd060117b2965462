//! Host-side MAX6675 simulation.
//!
//! Three pin handles share one simulated converter.  The model follows
//! the datasheet: pulling CS low presents D15 on SO, each falling clock
//! edge shifts the next bit out, and SO reads LOW while CS is high
//! (three-state with the breakout's pull-down).
//!
//! Used by the host tests and the control-loop fuzz target; never
//! compiled for the device.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

#[derive(Debug, Default)]
struct Bus {
    frame: u16,
    cs_low: bool,
    sck_high: bool,
    bit: u8,
    transactions: u32,
    clock_pulses: u32,
}

/// Simulated converter; clone freely, all clones share the same bus.
#[derive(Debug, Clone, Default)]
pub struct SimConverter {
    bus: Rc<RefCell<Bus>>,
}

impl SimConverter {
    pub fn new(frame: u16) -> Self {
        let sim = Self::default();
        sim.set_frame(frame);
        sim
    }

    /// Frame returned by the next transaction.
    pub fn set_frame(&self, frame: u16) {
        self.bus.borrow_mut().frame = frame;
    }

    pub fn chip_select(&self) -> SimChipSelect {
        SimChipSelect(self.bus.clone())
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.bus.clone())
    }

    pub fn data(&self) -> SimData {
        SimData(self.bus.clone())
    }

    /// Completed transactions (CS released after at least one clock).
    pub fn transactions(&self) -> u32 {
        self.bus.borrow().transactions
    }

    pub fn clock_pulses(&self) -> u32 {
        self.bus.borrow().clock_pulses
    }

    pub fn chip_selected(&self) -> bool {
        self.bus.borrow().cs_low
    }

    pub fn clock_high(&self) -> bool {
        self.bus.borrow().sck_high
    }
}

pub struct SimChipSelect(Rc<RefCell<Bus>>);
pub struct SimClock(Rc<RefCell<Bus>>);
pub struct SimData(Rc<RefCell<Bus>>);

impl ErrorType for SimChipSelect {
    type Error = Infallible;
}

impl OutputPin for SimChipSelect {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.0.borrow_mut();
        if !bus.cs_low {
            bus.cs_low = true;
            bus.bit = 0;
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.0.borrow_mut();
        if bus.cs_low && bus.bit > 0 {
            bus.transactions += 1;
        }
        bus.cs_low = false;
        Ok(())
    }
}

impl ErrorType for SimClock {
    type Error = Infallible;
}

impl OutputPin for SimClock {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.0.borrow_mut();
        if bus.sck_high && bus.cs_low {
            bus.bit = bus.bit.saturating_add(1);
            bus.clock_pulses += 1;
        }
        bus.sck_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().sck_high = true;
        Ok(())
    }
}

impl ErrorType for SimData {
    type Error = Infallible;
}

impl InputPin for SimData {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let bus = self.0.borrow();
        if !bus.cs_low || bus.bit >= 16 {
            return Ok(false);
        }
        Ok((bus.frame >> (15 - bus.bit)) & 1 == 1)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// Delay that only accounts for the time it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimDelay {
    elapsed_ns: u64,
}

impl SimDelay {
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
