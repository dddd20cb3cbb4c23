use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

mod conditions;
mod conversions;

pub use conditions::{
    IconFamily, capitalize_first, icon_family, icon_glyph, icon_url, theme_key,
};
pub use conversions::{convert_temp, format_clock, round_temp, unit_label, visibility_km};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Short label used when the API has no place name for a coordinate.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// What the user asked for: a searched city or a picked coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::City(name) => name.clone(),
            Self::Coordinates(coords) => format!("{:.4}, {:.4}", coords.latitude, coords.longitude),
        }
    }

    #[must_use]
    pub fn is_coordinates(&self) -> bool {
        matches!(self, Self::Coordinates(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub temperature_c: f32,
    pub feels_like_c: f32,
    pub temp_min_c: f32,
    pub temp_max_c: f32,
    pub humidity: Option<u8>,
    pub pressure_hpa: Option<u32>,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub wind_speed_ms: f32,
    pub wind_deg: Option<u16>,
    pub clouds: Option<u8>,
    pub visibility_m: Option<u32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub timezone_offset_seconds: i32,
}

impl CurrentWeather {
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.temperature_c, units))
    }

    #[must_use]
    pub fn feels_like(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.feels_like_c, units))
    }

    #[must_use]
    pub fn high_low(&self, units: Units) -> (i32, i32) {
        (
            round_temp(convert_temp(self.temp_max_c, units)),
            round_temp(convert_temp(self.temp_min_c, units)),
        )
    }

    #[must_use]
    pub fn theme(&self) -> String {
        theme_key(&self.condition_main)
    }
}

/// One 3-hour step of the upstream forecast feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp_utc_seconds: i64,
    pub temperature: f32,
    pub temperature_min: f32,
    pub temperature_max: f32,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
}

/// The sample standing in for a whole calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub calendar_date: NaiveDate,
    pub representative_sample: ForecastSample,
}

impl DayBucket {
    #[must_use]
    pub fn date_key(&self) -> String {
        self.calendar_date.format("%Y-%m-%d").to_string()
    }
}

/// A day bucket prepared for display: converted and rounded to whole degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub date: NaiveDate,
    pub temp: i32,
    pub min: i32,
    pub max: i32,
    pub description: String,
    pub condition_main: String,
    pub icon_code: String,
}

impl DayCard {
    #[must_use]
    pub fn from_bucket(bucket: &DayBucket, units: Units) -> Self {
        let sample = &bucket.representative_sample;
        Self {
            date: bucket.calendar_date,
            temp: round_temp(convert_temp(sample.temperature, units)),
            min: round_temp(convert_temp(sample.temperature_min, units)),
            max: round_temp(convert_temp(sample.temperature_max, units)),
            description: sample.condition_description.clone(),
            condition_main: sample.condition_main.clone(),
            icon_code: sample.icon_code.clone(),
        }
    }

    #[must_use]
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }

    #[must_use]
    pub fn short_date(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Everything one refresh produced. Replaced wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub days: Vec<DayBucket>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    #[must_use]
    pub fn day_cards(&self, units: Units) -> Vec<DayCard> {
        self.days
            .iter()
            .map(|bucket| DayCard::from_bucket(bucket, units))
            .collect()
    }

    /// Theme follows the first forecast day, falling back to current conditions.
    #[must_use]
    pub fn theme(&self) -> String {
        self.days.first().map_or_else(
            || self.current.theme(),
            |day| theme_key(&day.representative_sample.condition_main),
        )
    }
}
