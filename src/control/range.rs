//! Mapping of decoded temperatures onto the displayable range.

/// Lower bound of the displayed range (°C).
pub const DISPLAY_MIN_C: u16 = 0;
/// Default upper bound of the displayed range (°C).
pub const DISPLAY_MAX_C: u16 = 500;

/// Round to the nearest whole degree (halves away from zero) and clamp
/// into `[0, max_c]`.
///
/// Anything not representable (NaN) lands on the lower bound.
pub fn clamp_celsius(celsius: f32, max_c: u16) -> u16 {
    // `as` saturates and maps NaN to 0.
    celsius
        .round()
        .clamp(f32::from(DISPLAY_MIN_C), f32::from(max_c)) as u16
}
