//! System configuration parameters
//!
//! Pin assignment and loop timing for the thermogauge controller.
//! Defaults describe the reference board; a deployment can override any
//! subset of fields with a JSON document (see [`ControllerConfig::from_json`]).
//! The MAX6675 bit layout is protocol, not configuration, and lives in
//! [`crate::sensors::thermocouple`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::control::range::DISPLAY_MAX_C;
use crate::error::{self, Error};
use crate::pins;

/// GPIO roles, by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    /// Converter chip select (active LOW).
    pub chip_select: i32,
    /// Converter serial clock.
    pub clock: i32,
    /// Converter serial data (input).
    pub data: i32,
    /// Motor driver output.
    pub actuator: i32,
    /// Push-button toggling the motor request (active LOW).
    pub button: i32,
    /// Touch controller interrupt / address strap.
    pub touch_int: i32,
    /// Touch controller reset (active LOW).
    pub touch_reset: i32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            chip_select: pins::MAX_CS_GPIO,
            clock: pins::MAX_SCK_GPIO,
            data: pins::MAX_SO_GPIO,
            actuator: pins::MOTOR_GPIO,
            button: pins::MOTOR_BUTTON_GPIO,
            touch_int: pins::TOUCH_INT_GPIO,
            touch_reset: pins::TOUCH_RST_GPIO,
        }
    }
}

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub pins: PinConfig,

    // --- Sensor ---
    /// Thermocouple poll period (milliseconds).  The MAX6675 needs
    /// ~220 ms per conversion; polling faster returns stale data.
    pub sensor_poll_interval_ms: u32,
    /// Clock high/low settle time per bit (microseconds, >= 1).
    pub clock_settle_us: u32,
    /// Delay after asserting chip select before the first clock edge (microseconds).
    pub cs_setup_us: u32,

    // --- Actuator ---
    /// Actuator timer period (milliseconds).
    pub actuator_interval_ms: u32,
    /// Output held HIGH per pulse (milliseconds).
    pub pulse_high_ms: u32,
    /// Output held LOW after each pulse before returning (milliseconds).
    pub pulse_low_ms: u32,

    // --- Loop ---
    /// Idle delay at the end of every loop iteration (milliseconds).
    pub idle_delay_ms: u32,
    /// Upper bound of the displayed temperature range (°C).  May narrow
    /// the dial, never widen it past 500.
    pub display_max_c: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pins: PinConfig::default(),

            // Sensor
            sensor_poll_interval_ms: 1000, // 1 Hz
            clock_settle_us: 2,
            cs_setup_us: 2,

            // Actuator
            actuator_interval_ms: 50, // 20 Hz
            pulse_high_ms: 10,
            pulse_low_ms: 10,

            // Loop
            idle_delay_ms: 5,
            display_max_c: 500,
        }
    }
}

impl ControllerConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    /// Fields absent from `json` keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or `json` applied on top of them when an override exists.
    pub fn with_override(json: Option<&str>) -> error::Result<Self> {
        match json {
            Some(json) => Ok(Self::from_json(json)?),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the control loop cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("sensor_poll_interval_ms must be > 0"));
        }
        if self.actuator_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("actuator_interval_ms must be > 0"));
        }
        if self.clock_settle_us == 0 {
            return Err(ConfigError::ValidationFailed("clock_settle_us must be >= 1"));
        }
        if self.pulse_high_ms == 0 {
            return Err(ConfigError::ValidationFailed("pulse_high_ms must be > 0"));
        }
        match self.pulse_high_ms.checked_add(self.pulse_low_ms) {
            Some(pulse) if pulse <= self.actuator_interval_ms => {}
            _ => {
                return Err(ConfigError::ValidationFailed(
                    "pulse must fit inside the actuator period",
                ));
            }
        }
        if self.idle_delay_ms >= self.actuator_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "idle_delay_ms must be shorter than the actuator period",
            ));
        }
        if self.display_max_c == 0 || self.display_max_c > DISPLAY_MAX_C {
            return Err(ConfigError::ValidationFailed("display_max_c must be in 1..=500"));
        }

        // The touch strap may share a pad with the converter clock; the
        // converter and motor lines must not collide with each other.
        let p = &self.pins;
        let owned = [p.chip_select, p.clock, p.data, p.actuator, p.button];
        for (i, a) in owned.iter().enumerate() {
            if owned[i + 1..].contains(a) {
                return Err(ConfigError::ValidationFailed(
                    "converter, actuator and button pins must be distinct",
                ));
            }
        }
        if p.touch_reset == p.touch_int || owned.contains(&p.touch_reset) {
            return Err(ConfigError::ValidationFailed("touch_reset must be a dedicated pin"));
        }
        Ok(())
    }
}

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override document is not valid JSON for this schema.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Malformed => Self::Config("malformed config"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
