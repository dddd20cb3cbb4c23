use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::domain::auth::{AuthMode, Credentials, FieldErrors, Session, validate_credentials};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    Invalid(#[from] FieldErrors),
}

/// The authentication service the dashboard signs users in against.
pub trait AuthProvider {
    fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;
}

/// Accepts every well-formed submission without contacting a remote service.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAuthProvider;

impl LocalAuthProvider {
    fn open_session(credentials: &Credentials, mode: AuthMode) -> Result<Session, AuthError> {
        validate_credentials(credentials, mode)?;
        let name = match mode {
            AuthMode::SignUp => Some(credentials.name.clone()),
            AuthMode::SignIn => None,
        };
        info!(email = %credentials.email, ?mode, "session opened");
        Ok(Session {
            email: credentials.email.clone(),
            name,
            signed_in_at: Utc::now(),
        })
    }
}

impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        Self::open_session(credentials, AuthMode::SignIn)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        Self::open_session(credentials, AuthMode::SignUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Field;

    #[tokio::test]
    async fn sign_up_keeps_name_and_sign_in_does_not() {
        let credentials = Credentials {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        let provider = LocalAuthProvider;

        let session = provider.sign_up(&credentials).await.expect("sign-up");
        assert_eq!(session.name.as_deref(), Some("Ada"));

        let session = provider.sign_in(&credentials).await.expect("sign-in");
        assert_eq!(session.email, "ada@example.com");
        assert!(session.name.is_none());
    }

    #[tokio::test]
    async fn invalid_submission_is_rejected_with_field_errors() {
        let credentials = Credentials {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            ..Credentials::default()
        };
        let err = LocalAuthProvider
            .sign_in(&credentials)
            .await
            .expect_err("invalid email");
        match err {
            AuthError::Invalid(errors) => {
                assert_eq!(errors.get(Field::Email), Some("Invalid email"));
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }
}
