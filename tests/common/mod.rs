#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use weatherdesk::domain::{
    forecast::bucket_by_day,
    weather::{Coordinates, CurrentWeather, ForecastSample, WeatherReport},
};

/// 2024-01-01T00:00:00Z
pub const DAY_ONE: i64 = 1_704_067_200;
pub const HOUR: i64 = 3600;

pub const API_KEY: &str = "test-key";

pub fn sample(timestamp: i64, temperature: f32) -> ForecastSample {
    ForecastSample {
        timestamp_utc_seconds: timestamp,
        temperature,
        temperature_min: temperature - 2.0,
        temperature_max: temperature + 2.0,
        condition_main: "Clear".to_string(),
        condition_description: "clear sky".to_string(),
        icon_code: "01d".to_string(),
    }
}

pub fn current_payload() -> Value {
    json!({
        "coord": { "lon": 139.6917, "lat": 35.6895 },
        "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
        ],
        "main": {
            "temp": 14.2,
            "feels_like": 13.6,
            "temp_min": 12.9,
            "temp_max": 15.8,
            "pressure": 1016,
            "humidity": 77
        },
        "visibility": 8000,
        "wind": { "speed": 3.6, "deg": 150 },
        "clouds": { "all": 75 },
        "dt": DAY_ONE + 3 * HOUR,
        "sys": {
            "country": "JP",
            "sunrise": DAY_ONE - 3 * HOUR + 50 * 60,
            "sunset": DAY_ONE + 7 * HOUR + 40 * 60
        },
        "timezone": 32400,
        "name": "Tokyo",
        "cod": 200
    })
}

/// Three-hourly entries starting at midnight UTC on 2024-01-01.
pub fn forecast_payload(entries: i64) -> Value {
    let list: Vec<Value> = (0..entries)
        .map(|i| {
            json!({
                "dt": DAY_ONE + i * 3 * HOUR,
                "main": { "temp": 10.0 + i as f64, "temp_min": 9.0, "temp_max": 20.0 },
                "weather": [
                    { "main": "Clouds", "description": "scattered clouds", "icon": "03d" }
                ]
            })
        })
        .collect();
    json!({
        "cod": "200",
        "message": 0,
        "cnt": entries,
        "list": list,
        "city": { "name": "Tokyo", "country": "JP", "timezone": 32400 }
    })
}

pub fn london() -> CurrentWeather {
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
        condition_main: "Rain".to_string(),
        condition_description: "light rain".to_string(),
        icon_code: "10d".to_string(),
        wind_speed_ms: 4.1,
        wind_deg: Some(240),
        clouds: Some(90),
        visibility_m: Some(10_000),
        sunrise: Some(DAY_ONE + 8 * HOUR + 6 * 60),
        sunset: Some(DAY_ONE + 16 * HOUR + 2 * 60),
        timezone_offset_seconds: 0,
    }
}

/// Report with two forecast days, fetched at `fetched_at`.
pub fn report_at(fetched_at: DateTime<Utc>) -> WeatherReport {
    let samples: Vec<_> = (0..16).map(|i| sample(DAY_ONE + i * 3 * HOUR, 12.0)).collect();
    WeatherReport {
        current: london(),
        days: bucket_by_day(&samples, &Utc),
        fetched_at,
    }
}
