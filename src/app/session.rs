use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use tracing::{debug, warn};

use crate::domain::auth::Session;

const SESSION_FILE: &str = "session.json";

#[must_use]
pub fn session_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SESSION_FILE)
}

/// A missing or unreadable session file means nobody is signed in.
#[must_use]
pub fn load_session(path: &Path) -> Option<Session> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unreadable session file");
            None
        }
    }
}

pub fn save_session(path: &Path, session: &Session) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating session directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(session).context("serializing session failed")?;
    fs::write(path, payload).context("writing session file failed")
}

/// Returns whether a session was removed.
pub fn clear_session(path: &Path) -> anyhow::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).context("removing session file failed"),
    }
}

/// Weather commands only run for a signed-in user.
pub fn require_session(config_dir: Option<&Path>) -> anyhow::Result<Session> {
    let Some(dir) = config_dir else {
        bail!("no config directory available to hold a session; set WEATHERDESK_CONFIG_DIR");
    };
    match load_session(&session_path(dir)) {
        Some(session) => {
            debug!(email = %session.email, "session found");
            Ok(session)
        }
        None => bail!("sign in first: run `weatherdesk sign-in`"),
    }
}
