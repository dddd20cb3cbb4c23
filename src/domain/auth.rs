use std::{collections::BTreeMap, fmt, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm password",
        }
    }
}

/// Every failing field with its message, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.label()))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn validate_credentials(credentials: &Credentials, mode: AuthMode) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if credentials.email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(&credentials.email) {
        errors.insert(Field::Email, "Invalid email");
    }

    if credentials.password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }

    if mode == AuthMode::SignUp {
        if credentials.name.is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        if credentials.password != credentials.confirm_password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A signed-in user, persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}
