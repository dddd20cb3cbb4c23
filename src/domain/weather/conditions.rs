use crate::cli::IconMode;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Pictogram families keyed by the two-digit prefix of an icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFamily {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Mist,
    Unknown,
}

#[must_use]
pub fn icon_family(icon_code: &str) -> IconFamily {
    let prefix = icon_code.get(..2).unwrap_or_default();
    match prefix {
        "01" => IconFamily::Clear,
        "02" => IconFamily::PartlyCloudy,
        "03" | "04" => IconFamily::Cloudy,
        "09" | "10" => IconFamily::Rain,
        "11" => IconFamily::Thunder,
        "13" => IconFamily::Snow,
        "50" => IconFamily::Mist,
        _ => IconFamily::Unknown,
    }
}

#[must_use]
pub fn icon_glyph(icon_code: &str, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(icon_family(icon_code));
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(family: IconFamily) -> (&'static str, &'static str, &'static str) {
    match family {
        IconFamily::Clear => ("SUN", "☀️", "☀"),
        IconFamily::PartlyCloudy => ("PCL", "⛅", "⛅"),
        IconFamily::Cloudy => ("CLD", "☁️", "☁"),
        IconFamily::Rain => ("RAN", "🌧️", "☂"),
        IconFamily::Thunder => ("THN", "⛈️", "⚡"),
        IconFamily::Snow => ("SNW", "❄️", "❄"),
        IconFamily::Mist => ("FOG", "🌫️", "░"),
        IconFamily::Unknown => ("---", "🌤️", "☁"),
    }
}

#[must_use]
pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@2x.png")
}

/// Lower-cased condition category; empty when the category is unknown.
#[must_use]
pub fn theme_key(condition_main: &str) -> String {
    condition_main.trim().to_lowercase()
}

#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
