use std::time::Duration;

use chrono::{DateTime, Utc};

const OFFLINE_FAILURES: u32 = 3;
const OFFLINE_INTERVALS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

impl FreshnessState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stale => "stale",
            Self::Offline => "offline",
        }
    }
}

/// Data older than one refresh interval, or after a failed refresh, is stale.
/// Three intervals without success, or three failures in a row, is offline.
#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    refresh_interval: Duration,
    now: DateTime<Utc>,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= OFFLINE_FAILURES {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = (now - last_success).to_std().unwrap_or(Duration::ZERO);

    if age > refresh_interval.saturating_mul(OFFLINE_INTERVALS)
        || consecutive_failures >= OFFLINE_FAILURES
    {
        FreshnessState::Offline
    } else if age > refresh_interval || consecutive_failures >= 1 {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}

impl RefreshMetadata {
    pub fn mark_success(&mut self, at: DateTime<Utc>) {
        self.last_success = Some(at);
        self.consecutive_failures = 0;
    }

    pub fn mark_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    #[must_use]
    pub fn freshness(&self, refresh_interval: Duration, now: DateTime<Utc>) -> FreshnessState {
        evaluate_freshness(
            self.last_success,
            self.consecutive_failures,
            refresh_interval,
            now,
        )
    }

    #[must_use]
    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_success.map(|ts| (now - ts).num_minutes())
    }
}
