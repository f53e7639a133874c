use async_trait::async_trait;
use secrecy::Secret;

use super::{
    errors::SendError,
    models::{credentials::OAuth2Credentials, message::OutboundMessage, token::AccessToken},
};

/// Exchanges application credentials for an access token.
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    async fn acquire_token(&self, credentials: &OAuth2Credentials)
        -> Result<AccessToken, SendError>;
}

/// Delivers one message over an authenticated SMTP session.
#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    async fn deliver(&self, message: &OutboundMessage, auth: &SmtpAuth) -> Result<(), SendError>;
}

#[derive(Debug, Clone)]
pub enum SmtpAuth {
    /// SASL XOAUTH2 with a bearer token.
    XOAuth2 { user: String, token: AccessToken },
    /// PLAIN or LOGIN with an app password.
    Password {
        username: String,
        password: Secret<String>,
    },
}
