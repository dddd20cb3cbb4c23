use chrono::DateTime;

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Celsius => "C",
        Units::Fahrenheit => "F",
    }
}

#[must_use]
pub fn visibility_km(meters: u32) -> String {
    format!("{:.1}", f64::from(meters) / 1000.0)
}

/// Wall-clock `HH:MM` at a place `offset_seconds` east of UTC.
#[must_use]
pub fn format_clock(timestamp: i64, offset_seconds: i32) -> Option<String> {
    let shifted = timestamp.checked_add(i64::from(offset_seconds))?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.format("%H:%M").to_string())
}
