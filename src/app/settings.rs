use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    cli::{Cli, DEFAULT_REFRESH_SECS, IconMode, UnitsArg},
    domain::weather::Units,
};

const CONFIG_DIR_ENV: &str = "WEATHERDESK_CONFIG_DIR";
const SETTINGS_FILE: &str = "settings.json";
const MIN_REFRESH_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    pub units: Units,
    pub icon_mode: IconMode,
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub last_city: Option<String>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            units: Units::Celsius,
            icon_mode: IconMode::Unicode,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            last_city: None,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        settings.apply_cli_overrides(cli);
        settings
    }

    /// Flags left at their defaults keep whatever was persisted.
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.units == UnitsArg::Fahrenheit {
            self.units = Units::Fahrenheit;
        }
        if let Some(mode) = cli.icon_mode() {
            self.icon_mode = mode;
        }
        if cli.refresh_interval != DEFAULT_REFRESH_SECS {
            self.refresh_interval_secs = cli.refresh_interval;
        }
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(MIN_REFRESH_SECS))
    }
}

/// Settings in effect for this run: the persisted file with CLI flags on top.
/// The merged value is never written back.
pub fn load_runtime_settings(
    cli: &Cli,
    config_dir: Option<&Path>,
) -> (RuntimeSettings, Option<PathBuf>) {
    let Some(dir) = config_dir else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    let path = dir.join(SETTINGS_FILE);
    let mut settings = load_persisted_settings(&path);
    settings.apply_cli_overrides(cli);

    (settings, Some(path))
}

/// Missing or unreadable files yield the defaults.
#[must_use]
pub fn load_persisted_settings(path: &Path) -> RuntimeSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<RuntimeSettings>(&content).unwrap_or_else(|err| {
            debug!(path = %path.display(), %err, "ignoring unreadable settings file");
            RuntimeSettings::default()
        }),
        Err(_) => RuntimeSettings::default(),
    }
}

/// Updates only `last_city` in the file, leaving every other persisted value alone.
/// Returns whether the file changed.
pub fn remember_last_city(path: &Path, city: &str) -> anyhow::Result<bool> {
    let mut persisted = load_persisted_settings(path);
    if persisted.last_city.as_deref() == Some(city) {
        return Ok(false);
    }
    persisted.last_city = Some(city.to_string());
    save_runtime_settings(path, &persisted)?;
    Ok(true)
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

/// `$WEATHERDESK_CONFIG_DIR`, else `~/.config/weatherdesk`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base));
    }

    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("weatherdesk"))
}
