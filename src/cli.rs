#![allow(clippy::missing_errors_doc)]

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::{
    forecast::NoonClock,
    weather::{Coordinates, LocationQuery},
};

pub const DEFAULT_REFRESH_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NoonArg {
    /// This machine's clock
    Local,
    /// The searched city's clock
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconMode {
    Unicode,
    Ascii,
    Emoji,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weatherdesk",
    version,
    about = "Current conditions, 3-day forecast and condition alerts from OpenWeatherMap"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Display units
    #[arg(long, global = true, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// OpenWeatherMap API key
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the weather API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Force ASCII icons
    #[arg(long, global = true, conflicts_with = "emoji_icons")]
    pub ascii_icons: bool,

    /// Force emoji icons
    #[arg(long, global = true)]
    pub emoji_icons: bool,

    /// Clock that decides which sample is each forecast day's noon
    #[arg(long, global = true, value_enum, default_value_t = NoonArg::Local)]
    pub noon_at: NoonArg,

    /// Refresh interval in seconds for `watch`
    #[arg(long, global = true, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_interval: u64,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Current conditions for a city or a coordinate
    Current(LocationArgs),
    /// Forecast for the next three days
    Forecast(LocationArgs),
    /// Condition alert for the current weather
    Alerts(LocationArgs),
    /// Keep refreshing conditions, forecast and alert
    Watch(LocationArgs),
    /// Sign in with email and password
    SignIn(SignInArgs),
    /// Create an account and sign in
    SignUp(SignUpArgs),
    /// Forget the stored session
    SignOut,
}

#[derive(Debug, Args, Clone, Default)]
pub struct LocationArgs {
    /// City name (default: last searched city)
    pub city: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "city")]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "city")]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    /// Coordinates win over a city; a blank city counts as absent.
    #[must_use]
    pub fn query(&self, fallback_city: Option<&str>) -> Option<LocationQuery> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Some(LocationQuery::Coordinates(Coordinates::new(lat, lon)));
        }
        let non_blank = |city: &str| {
            let city = city.trim();
            (!city.is_empty()).then(|| city.to_string())
        };
        self.city
            .as_deref()
            .and_then(non_blank)
            .or_else(|| fallback_city.and_then(non_blank))
            .map(LocationQuery::City)
    }
}

#[derive(Debug, Args, Clone)]
pub struct SignInArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args, Clone)]
pub struct SignUpArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,
}

impl Cli {
    #[must_use]
    pub fn icon_mode(&self) -> Option<IconMode> {
        if self.ascii_icons {
            Some(IconMode::Ascii)
        } else if self.emoji_icons {
            Some(IconMode::Emoji)
        } else {
            None
        }
    }

    #[must_use]
    pub fn noon_clock(&self) -> NoonClock {
        match self.noon_at {
            NoonArg::Local => NoonClock::Local,
            NoonArg::City => NoonClock::City,
        }
    }

    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
