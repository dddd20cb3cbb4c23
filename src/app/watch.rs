use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc::{self, Sender};
use tracing::{debug, info};

use crate::{
    app::{
        events::{AppEvent, schedule_retry, start_refresh_task},
        settings::RuntimeSettings,
        state::{AppState, Command},
    },
    data::openweather::OpenWeatherClient,
    domain::weather::LocationQuery,
    ui,
};

/// Refreshes the report on a jittered interval until Ctrl-C.
pub async fn run_watch(
    client: OpenWeatherClient,
    query: LocationQuery,
    settings: RuntimeSettings,
) -> Result<()> {
    watch_until(client, query, settings, tokio::signal::ctrl_c()).await
}

async fn watch_until<F: Future>(
    client: OpenWeatherClient,
    query: LocationQuery,
    settings: RuntimeSettings,
    shutdown: F,
) -> Result<()> {
    tokio::pin!(shutdown);
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);
    let interval = settings.refresh_interval();
    let mut app = AppState::new(query, settings);

    let refresh = start_refresh_task(tx.clone(), interval);
    tx.send(AppEvent::TickRefresh).await?;
    info!(query = %app.query.describe(), ?interval, "watching weather");

    while app.is_running() {
        let event = tokio::select! {
            _ = &mut shutdown => AppEvent::Quit,
            maybe_event = rx.recv() => match maybe_event {
                Some(event) => event,
                None => break,
            },
        };

        let outcome = matches!(
            event,
            AppEvent::FetchSucceeded(_) | AppEvent::FetchFailed(_)
        );
        if let Some(command) = app.handle_event(event) {
            execute(command, &client, &tx);
        }
        if outcome {
            println!("{}\n", ui::watch_frame(&app, Utc::now()));
        }
    }

    refresh.abort();
    debug!("watch loop stopped");
    Ok(())
}

fn execute(command: Command, client: &OpenWeatherClient, tx: &Sender<AppEvent>) {
    match command {
        Command::Fetch(query) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let event = match client.report(&query).await {
                    Ok(report) => AppEvent::FetchSucceeded(Box::new(report)),
                    Err(err) => AppEvent::FetchFailed(err.user_message()),
                };
                let _ = tx.send(event).await;
            });
        }
        Command::Retry(delay) => {
            debug!(?delay, "scheduling retry");
            schedule_retry(tx.clone(), delay);
        }
    }
}
