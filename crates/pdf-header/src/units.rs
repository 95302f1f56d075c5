//! Color and unit helpers

use crate::constants::{MAX_RATIO, MIN_RATIO, POINTS_PER_MM};

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Parse `#RRGGBB` (the `#` is optional) into 8-bit channels
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// `#FF0000` → `(1.0, 0.0, 0.0)`; unparsable colors become black
pub fn hex_to_rgb_float(hex: &str) -> (f32, f32, f32) {
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Canonical uppercase `#RRGGBB`, or `fallback` when `hex` does not parse
pub fn normalize_hex(hex: &str, fallback: &str) -> String {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => rgb_to_hex(r, g, b),
        None => fallback.to_string(),
    }
}

/// Clamp to [0, 1]; NaN becomes 0
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp a ratio to the persisted range [0.01, 0.99]
pub fn clamp_ratio(value: f32) -> f32 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(MIN_RATIO, MAX_RATIO)
    }
}

/// Parse a user-typed number, accepting a decimal comma.
///
/// Anything unparsable yields `fallback`; the result is always clamped.
pub fn parse_number_or(input: &str, fallback: f32, min: f32, max: f32) -> f32 {
    input
        .trim()
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(fallback)
        .clamp(min, max)
}

