//! Default GPIO assignments for the reference board (ESP32 + 3.5" 320x480
//! touch panel + MAX6675 breakout + motor driver input).
//!
//! These only seed [`PinConfig::default`](crate::config::PinConfig).
//! Deployments override them through the configuration layer; nothing
//! else in the crate should reference these constants directly.

// ---------------------------------------------------------------------------
// MAX6675 thermocouple converter (bit-banged, shares traces with the panel)
// ---------------------------------------------------------------------------

/// Chip select, active LOW.
pub const MAX_CS_GPIO: i32 = 22;
/// Serial clock, idle LOW.
pub const MAX_SCK_GPIO: i32 = 21;
/// Serial data out from the converter (input-only pad on ESP32).
pub const MAX_SO_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Motor driver input
// ---------------------------------------------------------------------------

/// Digital output pulsed by the actuator timer.
pub const MOTOR_GPIO: i32 = 26;

/// Momentary push-button (active LOW, on-board BOOT key) that toggles the
/// motor request when no touch UI is attached.
pub const MOTOR_BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// GT911 capacitive touch controller
// ---------------------------------------------------------------------------

/// Touch interrupt line.  Also strapped at reset to select address 0x5D.
/// Shares the pad with the MAX6675 clock on the reference board; the
/// strap sequence runs before the converter link is configured.
pub const TOUCH_INT_GPIO: i32 = 21;
/// Touch controller reset, active LOW.
pub const TOUCH_RST_GPIO: i32 = 25;
