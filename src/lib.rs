pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::path::Path;

use anyhow::{Context, Result, bail};
use app::{
    session::{clear_session, require_session, save_session, session_path},
    settings::{RuntimeSettings, config_dir, load_runtime_settings, remember_last_city},
    watch::run_watch,
};
use cli::{Cli, Command, LocationArgs, SignInArgs, SignUpArgs};
use data::{
    auth::{AuthProvider, LocalAuthProvider},
    error::ApiError,
    openweather::OpenWeatherClient,
};
use domain::{
    alerts::condition_alert,
    auth::Credentials,
    weather::LocationQuery,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli);
    let config_dir = config_dir();

    match &cli.command {
        Command::SignIn(args) => sign_in(args, config_dir.as_deref()).await,
        Command::SignUp(args) => sign_up(args, config_dir.as_deref()).await,
        Command::SignOut => sign_out(config_dir.as_deref()),
        Command::Current(args)
        | Command::Forecast(args)
        | Command::Alerts(args)
        | Command::Watch(args) => weather(&cli, args, config_dir.as_deref()).await,
    }
}

async fn sign_in(args: &SignInArgs, config_dir: Option<&Path>) -> Result<()> {
    let credentials = Credentials {
        email: args.email.trim().to_string(),
        password: args.password.clone(),
        ..Credentials::default()
    };
    let session = LocalAuthProvider.sign_in(&credentials).await?;
    store_session(config_dir, &session)?;
    println!("Signed in as {}", session.email);
    Ok(())
}

async fn sign_up(args: &SignUpArgs, config_dir: Option<&Path>) -> Result<()> {
    let credentials = Credentials {
        name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
        password: args.password.clone(),
        confirm_password: args.confirm_password.clone(),
    };
    let session = LocalAuthProvider.sign_up(&credentials).await?;
    store_session(config_dir, &session)?;
    println!(
        "Welcome, {}! Signed in as {}",
        session.name.as_deref().unwrap_or("friend"),
        session.email
    );
    Ok(())
}

fn store_session(config_dir: Option<&Path>, session: &domain::auth::Session) -> Result<()> {
    let Some(dir) = config_dir else {
        bail!("no config directory available to hold a session; set WEATHERDESK_CONFIG_DIR");
    };
    save_session(&session_path(dir), session)
}

fn sign_out(config_dir: Option<&Path>) -> Result<()> {
    let removed = match config_dir {
        Some(dir) => clear_session(&session_path(dir))?,
        None => false,
    };
    if removed {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

async fn weather(cli: &Cli, args: &LocationArgs, config_dir: Option<&Path>) -> Result<()> {
    require_session(config_dir)?;
    args.validate()?;

    let (mut settings, settings_path) = load_runtime_settings(cli, config_dir);
    let Some(query) = args.query(settings.last_city.as_deref()) else {
        bail!("enter a city name or pass --lat and --lon");
    };

    let api_key = cli.api_key.clone().ok_or(ApiError::MissingApiKey)?;
    let client = match &cli.base_url {
        Some(base_url) => OpenWeatherClient::with_base_url(base_url, api_key)?,
        None => OpenWeatherClient::new(api_key)?,
    }
    .with_noon_clock(cli.noon_clock());

    let units = settings.units;
    let mode = settings.icon_mode;
    match &cli.command {
        Command::Current(_) => {
            let current = client
                .current(&query)
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            println!("{}", ui::current_card(&current, units, mode));
        }
        Command::Forecast(_) => {
            let report = client
                .report(&query)
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            println!("{}", report.current.display_name());
            println!("{}", ui::forecast_cards(&report.day_cards(units), units, mode));
        }
        Command::Alerts(_) => {
            let current = client
                .current(&query)
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
            let alert = condition_alert(&current.condition_main, mode);
            println!("{}\n", ui::alert_banner(&alert));
            println!("{}", ui::current_card(&current, units, mode));
        }
        Command::Watch(_) => {
            if let LocationQuery::City(city) = &query {
                remember_city(&mut settings, settings_path.as_deref(), city);
            }
            return run_watch(client, query, settings).await;
        }
        Command::SignIn(_) | Command::SignUp(_) | Command::SignOut => {}
    }

    if let LocationQuery::City(city) = &query {
        remember_city(&mut settings, settings_path.as_deref(), city);
    }
    Ok(())
}

/// Best effort: a settings write failure never blocks the lookup. Only the
/// city is written; this run's flags stay out of the file.
fn remember_city(settings: &mut RuntimeSettings, path: Option<&Path>, city: &str) {
    settings.last_city = Some(city.to_string());
    let Some(path) = path else {
        return;
    };
    match remember_last_city(path, city).context("saving last city failed") {
        Ok(true) => info!(%city, "remembered last city"),
        Ok(false) => {}
        Err(err) => warn!(error = %format!("{err:#}"), "could not persist settings"),
    }
}
