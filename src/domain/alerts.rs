use crate::cli::IconMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub icon: &'static str,
    pub message: &'static str,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Normal,
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertSeverity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Success => "GOOD",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Thunderstorm,
    Rain,
    Clear,
    Cloudy,
    Snow,
    Stable,
}

// Checked in order against the lower-cased category; first substring hit wins.
const RULES: &[(&str, AlertKind)] = &[
    ("thunderstorm", AlertKind::Thunderstorm),
    ("rain", AlertKind::Rain),
    ("clear", AlertKind::Clear),
    ("cloud", AlertKind::Cloudy),
    ("snow", AlertKind::Snow),
];

#[must_use]
pub fn classify_condition(condition_main: &str) -> AlertKind {
    let condition = condition_main.to_lowercase();
    RULES
        .iter()
        .find_map(|(needle, kind)| condition.contains(needle).then_some(*kind))
        .unwrap_or(AlertKind::Stable)
}

#[must_use]
pub fn condition_alert(condition_main: &str, mode: IconMode) -> WeatherAlert {
    let kind = classify_condition(condition_main);
    WeatherAlert {
        kind,
        icon: alert_icon(kind, mode),
        message: alert_message(kind),
        severity: alert_severity(kind),
    }
}

fn alert_severity(kind: AlertKind) -> AlertSeverity {
    match kind {
        AlertKind::Thunderstorm => AlertSeverity::Danger,
        AlertKind::Rain => AlertSeverity::Warning,
        AlertKind::Clear => AlertSeverity::Success,
        AlertKind::Cloudy | AlertKind::Snow => AlertSeverity::Info,
        AlertKind::Stable => AlertSeverity::Normal,
    }
}

fn alert_message(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Thunderstorm => "Severe Thunderstorm Alert! Stay indoors!",
        AlertKind::Rain => "It's raining. Don't forget your umbrella!",
        AlertKind::Clear => "Perfect weather! Enjoy your day!",
        AlertKind::Cloudy => "Cloudy skies, nice and cool outside.",
        AlertKind::Snow => "Snowfall alert, stay warm!",
        AlertKind::Stable => "Weather conditions are stable.",
    }
}

fn alert_icon(kind: AlertKind, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = match kind {
        AlertKind::Thunderstorm => ("!!", "⚡", "⚡"),
        AlertKind::Rain => ("!", "🌧️", "☂"),
        AlertKind::Clear => ("*", "🌞", "☀"),
        AlertKind::Cloudy => ("~", "☁️", "☁"),
        AlertKind::Snow => ("*", "❄️", "❄"),
        AlertKind::Stable => ("-", "🌤️", "·"),
    };
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}
