mod common;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use common::{DAY_ONE, HOUR, london, report_at};
use weatherdesk::{
    app::{
        events::AppEvent,
        settings::RuntimeSettings,
        state::{AppMode, AppState, Command},
    },
    cli::IconMode,
    domain::{
        alerts::AlertSeverity,
        weather::{LocationQuery, Units},
    },
    resilience::freshness::FreshnessState,
    ui,
};

const NETWORK_ERROR: &str = "Network error. Please try again.";

fn noon() -> DateTime<Utc> {
    Utc.timestamp_opt(DAY_ONE + 12 * HOUR, 0)
        .single()
        .expect("valid time")
}

fn app() -> AppState {
    let settings = RuntimeSettings {
        icon_mode: IconMode::Ascii,
        ..RuntimeSettings::default()
    };
    AppState::new(LocationQuery::City("London".to_string()), settings)
}

fn loaded_app() -> AppState {
    let mut app = app();
    app.handle_event(AppEvent::TickRefresh);
    app.handle_event(AppEvent::FetchSucceeded(Box::new(report_at(noon()))));
    app
}

#[test]
fn first_refresh_loads_then_shows_report() {
    let mut app = app();
    let command = app.handle_event(AppEvent::TickRefresh);
    assert_eq!(
        command,
        Some(Command::Fetch(LocationQuery::City("London".to_string())))
    );
    assert_eq!(app.mode, AppMode::Loading);

    app.handle_event(AppEvent::FetchSucceeded(Box::new(report_at(noon()))));
    assert_eq!(app.mode, AppMode::Ready);
    assert_eq!(app.theme, "clear");
    assert_eq!(app.day_cards().len(), 2);

    let alert = app.alert.as_ref().expect("alert for current conditions");
    assert_eq!(alert.severity, AlertSeverity::Warning);
    assert_eq!(alert.icon, "!");
    assert_eq!(app.freshness(noon() + TimeDelta::minutes(1)), FreshnessState::Fresh);
}

#[test]
fn failed_refresh_keeps_last_report_and_goes_stale() {
    let mut app = loaded_app();

    app.handle_event(AppEvent::TickRefresh);
    let retry = app.handle_event(AppEvent::FetchFailed(NETWORK_ERROR.to_string()));
    assert!(matches!(retry, Some(Command::Retry(_))));

    assert_eq!(app.mode, AppMode::Ready);
    assert!(app.report.is_some());
    assert_eq!(app.freshness(noon() + TimeDelta::minutes(1)), FreshnessState::Stale);

    for _ in 0..2 {
        app.handle_event(AppEvent::TickRefresh);
        app.handle_event(AppEvent::FetchFailed(NETWORK_ERROR.to_string()));
    }
    assert_eq!(app.freshness(noon() + TimeDelta::minutes(1)), FreshnessState::Offline);
}

#[test]
fn old_report_ages_into_offline_without_failures() {
    let app = loaded_app();
    assert_eq!(app.freshness(noon() + TimeDelta::minutes(11)), FreshnessState::Stale);
    assert_eq!(app.freshness(noon() + TimeDelta::minutes(31)), FreshnessState::Offline);
}

#[test]
fn failure_without_report_is_an_error_frame() {
    let mut app = app();
    app.handle_event(AppEvent::TickRefresh);
    app.handle_event(AppEvent::FetchFailed("City not found".to_string()));
    assert_eq!(app.mode, AppMode::Error);

    let frame = ui::watch_frame(&app, noon());
    assert_eq!(frame, "London · stale\n\n! City not found");
}

#[test]
fn watch_frame_leads_with_status_and_alert() {
    let app = loaded_app();
    let frame = ui::watch_frame(&app, noon() + TimeDelta::minutes(1));
    let mut sections = frame.split("\n\n");
    assert_eq!(
        sections.next(),
        Some("London, GB · updated 12:00 UTC (1 min ago) · fresh")
    );
    assert_eq!(
        sections.next(),
        Some("[WARNING] ! It's raining. Don't forget your umbrella!")
    );
}

#[test]
fn current_card_lists_every_reported_metric() {
    let card = ui::current_card(&london(), Units::Celsius, IconMode::Ascii);
    insta::assert_snapshot!(card, @r"
    London, GB
    RAN  8°C  Light rain
      Feels like  6°C
      Min / Max   7°C / 9°C
      Humidity    81%
      Pressure    1012 hPa
      Visibility  10.0 km
      Wind        4.1 m/s from 240°
      Clouds      90%
      Sunrise     08:06
      Sunset      16:02
      Icon        https://openweathermap.org/img/wn/10d@2x.png
    ");
}

#[test]
fn forecast_cards_align_in_columns() {
    let report = report_at(noon());
    let cards = report.day_cards(Units::Celsius);
    let cards = ui::forecast_cards(&cards, Units::Celsius, IconMode::Ascii);
    insta::assert_snapshot!(cards, @r"
    Monday    Jan 1   SUN   12°C  H 14°  L 10°  Clear sky
    Tuesday   Jan 2   SUN   12°C  H 14°  L 10°  Clear sky
    ");
}

#[test]
fn fahrenheit_cards_convert_before_rounding() {
    let report = report_at(noon());
    let cards = report.day_cards(Units::Fahrenheit);
    assert_eq!((cards[0].temp, cards[0].min, cards[0].max), (54, 50, 57));
}
