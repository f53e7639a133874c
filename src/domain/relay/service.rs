use std::sync::Arc;

use super::{
    errors::SendError,
    models::{
        credentials::{OAuth2Credentials, RelayCredentials},
        message::OutboundMessage,
        token::{AccessToken, TokenCache, TokenCacheKey},
    },
    ports::{MailTransport, SmtpAuth, TokenProvider},
};

/// Sends notification emails with whichever credentials the deployment has.
#[derive(Debug)]
pub struct Relay<P, T>
where
    P: TokenProvider,
    T: MailTransport,
{
    credentials: Option<RelayCredentials>,
    smtp_user: String,
    token_provider: P,
    transport: T,
    token_cache: Arc<TokenCache>,
}

impl<P, T> Relay<P, T>
where
    P: TokenProvider,
    T: MailTransport,
{
    /// `smtp_user` is the mailbox XOAUTH2 authenticates as.
    pub fn new(
        credentials: Option<RelayCredentials>,
        smtp_user: String,
        token_provider: P,
        transport: T,
        token_cache: Arc<TokenCache>,
    ) -> Self {
        if credentials.is_none() {
            tracing::warn!(
                "Relay credentials not configured. Set MICROSOFT_CLIENT_ID, \
                MICROSOFT_CLIENT_SECRET and MICROSOFT_TENANT_ID, or EMAIL_PASSWORD."
            );
        }
        Self {
            credentials,
            smtp_user,
            token_provider,
            transport,
            token_cache,
        }
    }

    #[tracing::instrument(
        name = "Relay a notification email",
        skip(self, message),
        fields(
            auth_mode = tracing::field::Empty,
            recipients = message.to().len(),
        )
    )]
    pub async fn send(&self, message: OutboundMessage) -> Result<(), SendError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            SendError::Configuration(
                "Neither OAuth2 client credentials nor an SMTP password are configured".into(),
            )
        })?;
        tracing::Span::current().record("auth_mode", tracing::field::display(credentials.mode()));

        let outcome = match credentials {
            RelayCredentials::OAuth2(oauth2) => self.send_with_oauth2(oauth2, &message).await,
            RelayCredentials::Password(password) => {
                let auth = SmtpAuth::Password {
                    username: password.username.clone(),
                    password: password.password.clone(),
                };
                self.transport.deliver(&message, &auth).await
            }
        };

        match &outcome {
            Ok(()) => tracing::info!("Notification email relayed"),
            Err(e) => tracing::error!(
                error.kind = e.kind(),
                error.message = %e,
                "Failed to relay notification email"
            ),
        }
        outcome
    }

    async fn send_with_oauth2(
        &self,
        credentials: &OAuth2Credentials,
        message: &OutboundMessage,
    ) -> Result<(), SendError> {
        let key = TokenCacheKey::from(credentials);
        let token = self.access_token(key.clone(), credentials).await?;
        let auth = SmtpAuth::XOAuth2 {
            user: self.smtp_user.clone(),
            token,
        };

        let outcome = self.transport.deliver(message, &auth).await;
        if let Err(SendError::Auth { .. }) = outcome {
            // The server refused the bearer token; make the next send fetch a new one.
            self.token_cache.invalidate(&key).await;
        }
        outcome
    }

    async fn access_token(
        &self,
        key: TokenCacheKey,
        credentials: &OAuth2Credentials,
    ) -> Result<AccessToken, SendError> {
        self.token_cache
            .get_or_refresh(key, || self.token_provider.acquire_token(credentials))
            .await
    }
}
