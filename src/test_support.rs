use chrono::{TimeZone, Utc};
use clap::Parser;

use crate::{
    cli::Cli,
    domain::{
        forecast::bucket_by_day,
        weather::{Coordinates, CurrentWeather, ForecastSample, WeatherReport},
    },
};

/// 2024-01-01T00:00:00Z
pub(crate) const DAY_ONE: i64 = 1_704_067_200;
pub(crate) const HOUR: i64 = 3600;

pub(crate) fn sample_at(timestamp: i64) -> ForecastSample {
    ForecastSample {
        timestamp_utc_seconds: timestamp,
        temperature: 10.0,
        temperature_min: 8.0,
        temperature_max: 12.0,
        condition_main: "Clouds".to_string(),
        condition_description: "overcast clouds".to_string(),
        icon_code: "04d".to_string(),
    }
}

pub(crate) fn sample_current() -> CurrentWeather {
    CurrentWeather {
        name: "London".to_string(),
        country: Some("GB".to_string()),
        coordinates: Some(Coordinates::new(51.5085, -0.1257)),
        temperature_c: 8.4,
        feels_like_c: 6.1,
        temp_min_c: 7.2,
        temp_max_c: 9.3,
        humidity: Some(81),
        pressure_hpa: Some(1012),
        condition_main: "Clouds".to_string(),
        condition_description: "overcast clouds".to_string(),
        icon_code: "04d".to_string(),
        wind_speed_ms: 4.1,
        wind_deg: Some(240),
        clouds: Some(90),
        visibility_m: Some(10_000),
        sunrise: Some(1_704_096_360),
        sunset: Some(1_704_124_920),
        timezone_offset_seconds: 0,
    }
}

pub(crate) fn sample_report() -> WeatherReport {
    let samples: Vec<_> = (0..24).map(|i| sample_at(DAY_ONE + i * 3 * HOUR)).collect();
    WeatherReport {
        current: sample_current(),
        days: bucket_by_day(&samples, &Utc),
        fetched_at: Utc
            .timestamp_opt(DAY_ONE + 12 * HOUR, 0)
            .single()
            .expect("valid fixture time"),
    }
}

/// Parses global flags in front of a subcommand that needs no arguments.
pub(crate) fn cli_from(args: &[&str]) -> Cli {
    Cli::parse_from(
        std::iter::once("weatherdesk")
            .chain(args.iter().copied())
            .chain(std::iter::once("sign-out")),
    )
}
