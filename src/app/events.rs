use std::time::Duration;

use rand::Rng;
use tokio::{sync::mpsc::Sender, task::JoinHandle, time::sleep};

use crate::domain::weather::WeatherReport;

#[derive(Debug)]
pub enum AppEvent {
    TickRefresh,
    FetchSucceeded(Box<WeatherReport>),
    FetchFailed(String),
    Quit,
}

pub fn start_refresh_task(tx: Sender<AppEvent>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(jittered(interval)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    })
}

pub fn schedule_retry(tx: Sender<AppEvent>, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay.max(Duration::from_secs(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    });
}

/// Spreads refreshes by +-10% so several clients don't hit the API in lockstep.
#[must_use]
pub fn jittered(interval: Duration) -> Duration {
    let jitter = rand::rng().random_range(-0.1f64..0.1f64);
    interval.mul_f64(1.0 + jitter).max(Duration::from_secs(1))
}
