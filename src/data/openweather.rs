use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    data::error::ApiError,
    domain::{
        forecast::NoonClock,
        weather::{
            Coordinates, CurrentWeather, DayBucket, ForecastSample, LocationQuery, WeatherReport,
        },
    },
};

const API_ROOT: &str = "https://api.openweathermap.org";
const DEFAULT_ICON: &str = "01d";
const COORDINATES_UNAVAILABLE: &str = "Weather data not available for this location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Self::Current => "/data/2.5/weather",
            Self::Forecast => "/data/2.5/forecast",
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Self::Current => "Could not fetch weather data",
            Self::Forecast => "Could not fetch forecast",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    noon_clock: NoonClock,
}

/// Forecast entries that survived payload validation, in feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastFeed {
    pub utc_offset_seconds: Option<i32>,
    pub samples: Vec<ForecastSample>,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(API_ROOT, api_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            noon_clock: NoonClock::default(),
        })
    }

    /// Which clock picks each forecast day's noon sample in [`Self::report`].
    #[must_use]
    pub fn with_noon_clock(mut self, noon_clock: NoonClock) -> Self {
        self.noon_clock = noon_clock;
        self
    }

    pub async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ApiError> {
        let payload: CurrentPayload = self.get(Endpoint::Current, query).await?;
        Ok(payload.into_current(query))
    }

    pub async fn forecast(&self, query: &LocationQuery) -> Result<ForecastFeed, ApiError> {
        let payload: ForecastPayload = self.get(Endpoint::Forecast, query).await?;
        Ok(payload.into_feed())
    }

    /// Current conditions plus the bucketed 3-day forecast, fetched together.
    ///
    /// The city clock uses the forecast feed's offset, else the one reported
    /// with current conditions.
    pub async fn report(&self, query: &LocationQuery) -> Result<WeatherReport, ApiError> {
        let (current, feed) = tokio::try_join!(self.current(query), self.forecast(query))?;
        let offset = feed
            .utc_offset_seconds
            .unwrap_or(current.timezone_offset_seconds);
        let days = self.noon_clock.bucket(&feed.samples, offset);
        info!(
            query = %query.describe(),
            samples = feed.samples.len(),
            days = ?days.iter().map(DayBucket::date_key).collect::<Vec<_>>(),
            noon_clock = ?self.noon_clock,
            "weather report fetched"
        );
        Ok(WeatherReport {
            current,
            days,
            fetched_at: Utc::now(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &LocationQuery,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut params: Vec<(&str, String)> = match query {
            LocationQuery::City(city) => vec![("q", city.clone())],
            LocationQuery::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        debug!(%url, query = %query.describe(), "requesting weather data");
        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_payload(status, &body, query, endpoint)
    }
}

/// The API reports failures in the body (`cod` + `message`) as well as in the
/// HTTP status; `cod` is a number on some endpoints and a string on others.
/// Any failed coordinate lookup reads "not available for this location".
fn decode_payload<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    query: &LocationQuery,
    endpoint: Endpoint,
) -> Result<T, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if status.is_success() => return Err(ApiError::Decode(err.to_string())),
        Err(_) => {
            return Err(ApiError::Api {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }
    };

    let code = value
        .get("cod")
        .and_then(status_code)
        .unwrap_or_else(|| status.as_u16());
    if code != 200 {
        let message = if query.is_coordinates() {
            Some(COORDINATES_UNAVAILABLE.to_string())
        } else {
            value.get("message").and_then(message_text)
        };
        return Err(if code == 404 {
            ApiError::NotFound(message.unwrap_or_else(|| "City not found".to_string()))
        } else {
            ApiError::Api {
                code,
                message: message.unwrap_or_else(|| endpoint.fallback_message().to_string()),
            }
        });
    }

    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

fn status_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    #[serde(default)]
    name: String,
    coord: Option<CoordBlock>,
    main: CurrentMain,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    wind: Option<WindBlock>,
    clouds: Option<CloudsBlock>,
    visibility: Option<u32>,
    sys: Option<SysBlock>,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct CoordBlock {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f32,
    feels_like: Option<f32>,
    temp_min: Option<f32>,
    temp_max: Option<f32>,
    humidity: Option<u8>,
    pressure: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f32,
    deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct SysBlock {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl CurrentPayload {
    fn into_current(self, query: &LocationQuery) -> CurrentWeather {
        let condition = self.weather.into_iter().next().unwrap_or_default();
        let queried_coords = match query {
            LocationQuery::Coordinates(coords) => Some(*coords),
            LocationQuery::City(_) => None,
        };
        let coordinates = self
            .coord
            .map(|c| Coordinates::new(c.lat, c.lon))
            .or(queried_coords);
        let name = if self.name.is_empty() {
            queried_coords.map_or_else(|| query.describe(), |coords| coords.label())
        } else {
            self.name
        };
        let sys = self.sys.unwrap_or_default();
        let temp = self.main.temp;

        CurrentWeather {
            name,
            country: sys.country.filter(|c| !c.is_empty()),
            coordinates,
            temperature_c: temp,
            feels_like_c: self.main.feels_like.unwrap_or(temp),
            temp_min_c: self.main.temp_min.unwrap_or(temp),
            temp_max_c: self.main.temp_max.unwrap_or(temp),
            humidity: self.main.humidity,
            pressure_hpa: self.main.pressure,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: non_empty_icon(condition.icon),
            wind_speed_ms: self.wind.as_ref().map_or(0.0, |w| w.speed),
            wind_deg: self.wind.and_then(|w| w.deg),
            clouds: self.clouds.and_then(|c| c.all),
            visibility_m: self.visibility,
            sunrise: sys.sunrise,
            sunset: sys.sunset,
            timezone_offset_seconds: self.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    #[serde(default)]
    list: Vec<ForecastEntry>,
    city: Option<CityBlock>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: Option<i64>,
    main: Option<ForecastMain>,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: Option<f32>,
    temp_min: Option<f32>,
    temp_max: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct CityBlock {
    timezone: Option<i32>,
}

impl ForecastPayload {
    fn into_feed(self) -> ForecastFeed {
        let total = self.list.len();
        let samples: Vec<ForecastSample> =
            self.list.into_iter().filter_map(ForecastEntry::into_sample).collect();
        if samples.len() < total {
            debug!(
                dropped = total - samples.len(),
                "skipped forecast entries without timestamp or temperature"
            );
        }
        ForecastFeed {
            utc_offset_seconds: self.city.and_then(|city| city.timezone),
            samples,
        }
    }
}

impl ForecastEntry {
    fn into_sample(self) -> Option<ForecastSample> {
        let timestamp_utc_seconds = self.dt?;
        let main = self.main?;
        let temperature = main.temp?;
        let condition = self.weather.into_iter().next().unwrap_or_default();
        Some(ForecastSample {
            timestamp_utc_seconds,
            temperature,
            temperature_min: main.temp_min.unwrap_or(temperature),
            temperature_max: main.temp_max.unwrap_or(temperature),
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: non_empty_icon(condition.icon),
        })
    }
}

fn non_empty_icon(icon: String) -> String {
    if icon.is_empty() {
        DEFAULT_ICON.to_string()
    } else {
        icon
    }
}
