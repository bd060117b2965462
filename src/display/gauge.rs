//! Dial gauge view model.
//!
//! ## Geometry
//!
//! The dial sweeps 270° clockwise, centred on straight up:
//!
//! | Value  | Needle angle |
//! |--------|--------------|
//! | 0 °C   | -135.0°      |
//! | 250 °C | 0.0°         |
//! | 500 °C | +135.0°      |
//!
//! Angles are whole degrees (truncated toward zero) reported in tenths,
//! the unit most embedded UI libraries take for transforms.
//!
//! ## Zones
//!
//! | Zone   | Range        | Dial colour |
//! |--------|--------------|-------------|
//! | Cold   | [0, 200)     | blue        |
//! | Normal | [200, 400)   | green       |
//! | Hot    | [400, max]   | red         |

use core::fmt::Write;

use heapless::String;

use crate::app::ports::DisplayPort;
use crate::control::range::DISPLAY_MAX_C;
use crate::error::SensorFault;

const SWEEP_DEG: f32 = 270.0;
const START_DEG: f32 = -135.0;

const COLD_BELOW_C: u16 = 200;
const HOT_FROM_C: u16 = 400;

/// Fits "not connected" and any "NNN°C".
pub type Label = String<16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Cold,
    Normal,
    Hot,
}

impl Zone {
    pub fn of(celsius: u16) -> Self {
        if celsius < COLD_BELOW_C {
            Self::Cold
        } else if celsius < HOT_FROM_C {
            Self::Normal
        } else {
            Self::Hot
        }
    }
}

/// Motor button fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonColour {
    Green,
    Red,
}

/// Needle rotation in tenths of a degree for `celsius` on a `0..=max_c` dial.
pub fn needle_angle_decideg(celsius: u16, max_c: u16) -> i16 {
    let max_c = max_c.max(1);
    let frac = f32::from(celsius.min(max_c)) / f32::from(max_c);
    let deg = (START_DEG + frac * SWEEP_DEG) as i16;
    deg * 10
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeView {
    max_c: u16,
    value_c: u16,
    needle_decideg: i16,
    zone: Zone,
    label: Label,
    connected: bool,
    actuator_on: bool,
    dirty: bool,
}

impl GaugeView {
    pub fn new(max_c: u16) -> Self {
        let mut view = Self {
            max_c,
            value_c: 0,
            needle_decideg: needle_angle_decideg(0, max_c),
            zone: Zone::of(0),
            label: Label::new(),
            connected: true,
            actuator_on: false,
            dirty: true,
        };
        view.set_value_label(0);
        view
    }

    fn set_value_label(&mut self, celsius: u16) {
        self.label.clear();
        // "65535°C" is 8 bytes; cannot overflow the label.
        let _ = write!(self.label, "{}\u{00b0}C", celsius);
    }

    pub fn value_c(&self) -> u16 {
        self.value_c
    }

    pub fn needle_decideg(&self) -> i16 {
        self.needle_decideg
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn actuator_on(&self) -> bool {
        self.actuator_on
    }

    pub fn button_colour(&self) -> ButtonColour {
        if self.actuator_on {
            ButtonColour::Green
        } else {
            ButtonColour::Red
        }
    }

    /// True once after any visible change; the renderer calls this after
    /// drawing a frame.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl Default for GaugeView {
    fn default() -> Self {
        Self::new(DISPLAY_MAX_C)
    }
}

impl DisplayPort for GaugeView {
    fn show_temperature(&mut self, celsius: u16) {
        let celsius = celsius.min(self.max_c);
        if self.connected && celsius == self.value_c {
            return;
        }
        self.value_c = celsius;
        self.connected = true;
        self.needle_decideg = needle_angle_decideg(celsius, self.max_c);
        self.zone = Zone::of(celsius);
        self.set_value_label(celsius);
        self.dirty = true;
    }

    fn show_not_connected(&mut self) {
        if !self.connected {
            return;
        }
        // Needle and zone stay on the last good value.
        self.connected = false;
        self.label.clear();
        let _ = self.label.push_str(SensorFault::OpenCircuit.display_text());
        self.dirty = true;
    }

    fn show_actuator(&mut self, on: bool) {
        if self.actuator_on != on {
            self.actuator_on = on;
            self.dirty = true;
        }
    }
}
