use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    app::{events::AppEvent, settings::RuntimeSettings},
    domain::{
        alerts::{WeatherAlert, condition_alert},
        weather::{DayCard, LocationQuery, WeatherReport},
    },
    resilience::{
        backoff::Backoff,
        freshness::{FreshnessState, RefreshMetadata},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Idle,
    Loading,
    Ready,
    Error,
    Quit,
}

/// Side effects the event loop runs on behalf of the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(LocationQuery),
    Retry(Duration),
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub query: LocationQuery,
    pub settings: RuntimeSettings,
    pub report: Option<WeatherReport>,
    pub alert: Option<WeatherAlert>,
    pub theme: String,
    pub last_error: Option<String>,
    pub refresh_meta: RefreshMetadata,
    pub backoff: Backoff,
    pub fetch_in_flight: bool,
}

impl AppState {
    #[must_use]
    pub fn new(query: LocationQuery, settings: RuntimeSettings) -> Self {
        Self {
            mode: AppMode::Idle,
            query,
            settings,
            report: None,
            alert: None,
            theme: String::new(),
            last_error: None,
            refresh_meta: RefreshMetadata::default(),
            backoff: Backoff::default(),
            fetch_in_flight: false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::TickRefresh => self.handle_tick_refresh(),
            AppEvent::FetchSucceeded(report) => {
                self.handle_fetch_succeeded(*report);
                None
            }
            AppEvent::FetchFailed(message) => self.handle_fetch_failed(message),
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
                None
            }
        }
    }

    fn handle_tick_refresh(&mut self) -> Option<Command> {
        if self.fetch_in_flight || self.mode == AppMode::Quit {
            return None;
        }
        self.fetch_in_flight = true;
        if self.report.is_none() {
            self.mode = AppMode::Loading;
        }
        Some(Command::Fetch(self.query.clone()))
    }

    fn handle_fetch_succeeded(&mut self, report: WeatherReport) {
        self.fetch_in_flight = false;
        self.refresh_meta.mark_success(report.fetched_at);
        self.backoff.reset();
        self.alert = Some(condition_alert(
            &report.current.condition_main,
            self.settings.icon_mode,
        ));
        self.theme = report.theme();
        self.last_error = None;
        info!(days = report.days.len(), theme = %self.theme, "report applied");
        self.report = Some(report);
        if self.mode != AppMode::Quit {
            self.mode = AppMode::Ready;
        }
    }

    /// The last good report stays on screen; only the error is recorded.
    fn handle_fetch_failed(&mut self, message: String) -> Option<Command> {
        self.fetch_in_flight = false;
        self.refresh_meta.mark_failure();
        warn!(
            failures = self.refresh_meta.consecutive_failures,
            error = %message,
            "refresh failed"
        );
        self.last_error = Some(message);
        if self.mode == AppMode::Quit {
            return None;
        }
        self.mode = if self.report.is_some() {
            AppMode::Ready
        } else {
            AppMode::Error
        };
        Some(Command::Retry(self.backoff.next_delay()))
    }

    #[must_use]
    pub fn freshness(&self, now: DateTime<Utc>) -> FreshnessState {
        self.refresh_meta
            .freshness(self.settings.refresh_interval(), now)
    }

    #[must_use]
    pub fn day_cards(&self) -> Vec<DayCard> {
        self.report
            .as_ref()
            .map(|report| report.day_cards(self.settings.units))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.mode != AppMode::Quit
    }
}
