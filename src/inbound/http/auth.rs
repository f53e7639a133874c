use actix_web::HttpRequest;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};

use crate::inbound::http::errors::AppError;
use crate::outbound::telemetry::spawn_blocking_with_tracing;

pub mod basic;
pub mod password;

use password::{verify_password_hash, PasswordError, DUMMY_PASSWORD_HASH};

/// Admin username and the argon2 PHC hash of its password.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Secret<String>,
}

impl AdminCredentials {
    pub fn new(username: String, password_hash: Secret<String>) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Checks the request's `Basic` credentials, returning the admin username.
    #[tracing::instrument(
        name = "Authenticate admin",
        skip(self, request),
        fields(username = tracing::field::Empty)
    )]
    pub async fn authorize(&self, request: &HttpRequest) -> Result<String, AppError> {
        let credentials = basic::basic_authentication(request)?;
        tracing::Span::current()
            .record("username", tracing::field::display(&credentials.username));

        if self.username.is_empty() || self.password_hash.expose_secret().is_empty() {
            return Err(AppError::AuthError("Admin access is disabled".to_string()));
        }

        let known_user = credentials.username == self.username;
        let expected_password_hash = if known_user {
            self.password_hash.clone()
        } else {
            Secret::new(DUMMY_PASSWORD_HASH.to_string())
        };
        let password_candidate = credentials.password;

        spawn_blocking_with_tracing(move || {
            verify_password_hash(expected_password_hash, password_candidate)
        })
        .await
        .context("Failed to spawn a blocking task.")
        .map_err(AppError::Unexpected)??;

        if !known_user {
            return Err(AppError::AuthError("Invalid username or password".to_string()));
        }
        Ok(credentials.username)
    }
}

impl From<PasswordError> for AppError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::Mismatch => {
                AppError::AuthError("Invalid username or password".to_string())
            }
            PasswordError::Unexpected(e) => AppError::Unexpected(e),
        }
    }
}
