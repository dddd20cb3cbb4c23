//! Plain-text reports printed to stdout.

use chrono::{DateTime, Utc};

use crate::{
    app::state::{AppMode, AppState},
    cli::IconMode,
    domain::{
        alerts::WeatherAlert,
        weather::{
            CurrentWeather, DayCard, Units, capitalize_first, format_clock, icon_glyph,
            icon_url, unit_label, visibility_km,
        },
    },
};

#[must_use]
pub fn current_card(weather: &CurrentWeather, units: Units, mode: IconMode) -> String {
    let unit = unit_label(units);
    let (high, low) = weather.high_low(units);
    let mut lines = vec![
        weather.display_name(),
        format!(
            "{}  {}°{unit}  {}",
            icon_glyph(&weather.icon_code, mode),
            weather.current_temp(units),
            capitalize_first(&weather.condition_description)
        ),
        metric("Feels like", format!("{}°{unit}", weather.feels_like(units))),
        metric("Min / Max", format!("{low}°{unit} / {high}°{unit}")),
    ];

    if let Some(humidity) = weather.humidity {
        lines.push(metric("Humidity", format!("{humidity}%")));
    }
    if let Some(pressure) = weather.pressure_hpa {
        lines.push(metric("Pressure", format!("{pressure} hPa")));
    }
    if let Some(visibility) = weather.visibility_m {
        lines.push(metric("Visibility", format!("{} km", visibility_km(visibility))));
    }
    let wind = match weather.wind_deg {
        Some(deg) => format!("{:.1} m/s from {deg}°", weather.wind_speed_ms),
        None => format!("{:.1} m/s", weather.wind_speed_ms),
    };
    lines.push(metric("Wind", wind));
    if let Some(clouds) = weather.clouds {
        lines.push(metric("Clouds", format!("{clouds}%")));
    }

    let offset = weather.timezone_offset_seconds;
    let sunrise = weather.sunrise.and_then(|ts| format_clock(ts, offset));
    let sunset = weather.sunset.and_then(|ts| format_clock(ts, offset));
    if let (Some(sunrise), Some(sunset)) = (sunrise, sunset) {
        lines.push(metric("Sunrise", sunrise));
        lines.push(metric("Sunset", sunset));
    }
    lines.push(metric("Icon", icon_url(&weather.icon_code)));

    lines.join("\n")
}

fn metric(label: &str, value: String) -> String {
    format!("  {label:<12}{value}")
}

#[must_use]
pub fn forecast_cards(cards: &[DayCard], units: Units, mode: IconMode) -> String {
    if cards.is_empty() {
        return "No forecast available".to_string();
    }
    let unit = unit_label(units);
    cards
        .iter()
        .map(|card| {
            format!(
                "{:<9} {:<6}  {}  {:>3}°{unit}  H {}°  L {}°  {}",
                card.weekday(),
                card.short_date(),
                icon_glyph(&card.icon_code, mode),
                card.temp,
                card.max,
                card.min,
                capitalize_first(&card.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn alert_banner(alert: &WeatherAlert) -> String {
    format!("[{}] {} {}", alert.severity.label(), alert.icon, alert.message)
}

/// One refresh of `watch`: status line, then whatever data is on hand.
#[must_use]
pub fn watch_frame(state: &AppState, now: DateTime<Utc>) -> String {
    let units = state.settings.units;
    let mode = state.settings.icon_mode;
    let freshness = state.freshness(now).label();

    let status = match (&state.report, state.mode) {
        (_, AppMode::Loading) => format!("{} · loading…", state.query.describe()),
        (Some(report), _) => format!(
            "{} · updated {} UTC{} · {freshness}",
            report.current.display_name(),
            report.fetched_at.format("%H:%M"),
            state
                .refresh_meta
                .age_minutes(now)
                .map(|minutes| format!(" ({minutes} min ago)"))
                .unwrap_or_default()
        ),
        (None, _) => format!("{} · {freshness}", state.query.describe()),
    };

    let mut sections = vec![status];
    if let Some(report) = &state.report {
        if let Some(alert) = &state.alert {
            sections.push(alert_banner(alert));
        }
        sections.push(current_card(&report.current, units, mode));
        sections.push(forecast_cards(&state.day_cards(), units, mode));
    }
    if let Some(error) = &state.last_error {
        sections.push(format!("! {error}"));
    }
    sections.join("\n\n")
}
