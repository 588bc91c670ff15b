//! Raw sensor words to degrees Celsius and percent relative humidity, and back.
//!
//! Both quantities are linear over the full 16-bit range: temperature spans -45°C to 130°C,
//! humidity spans 0%RH to 100%RH.

const FULL_SCALE: f32 = 65535.0;

/// Convert a raw temperature word to degrees Celsius.
pub fn temperature_celsius(raw: u16) -> f32 {
    (175.0 * f32::from(raw) - 45.0 * FULL_SCALE) / FULL_SCALE
}

/// Convert a raw humidity word to percent relative humidity.
pub fn humidity_percent(raw: u16) -> f32 {
    100.0 * f32::from(raw) / FULL_SCALE
}

/// Inverse of [`temperature_celsius`]. Values outside -45°C..=130°C saturate.
pub fn temperature_raw_from_celsius(celsius: f32) -> u16 {
    // float to int casts saturate
    ((celsius + 45.0) * FULL_SCALE / 175.0).round() as u16
}

/// Inverse of [`humidity_percent`]. Values outside 0%..=100% saturate.
pub fn humidity_raw_from_percent(percent: f32) -> u16 {
    (percent * FULL_SCALE / 100.0).round() as u16
}
