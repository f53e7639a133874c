use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use secrecy::Secret;
use tokio::sync::Mutex;

use super::credentials::OAuth2Credentials;
use crate::domain::relay::errors::SendError;

/// Tokens this close to expiry are treated as already expired.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
pub struct AccessToken {
    value: Secret<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: Secret::new(value),
            expires_at,
        }
    }

    pub fn issued_now(value: String, expires_in_seconds: i64) -> Self {
        Self::new(value, Utc::now() + Duration::seconds(expires_in_seconds))
    }

    pub fn value(&self) -> &Secret<String> {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether a cached token is too close to expiry to hand out again.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECONDS) >= self.expires_at
    }

    /// Whether the token is past its expiry, ignoring the reuse margin.
    pub fn has_lapsed(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenCacheKey {
    client_id: String,
    tenant_id: String,
}

impl From<&OAuth2Credentials> for TokenCacheKey {
    fn from(credentials: &OAuth2Credentials) -> Self {
        Self {
            client_id: credentials.client_id.clone(),
            tenant_id: credentials.tenant_id.clone(),
        }
    }
}

/// Process-wide store of access tokens, shared between relays through an `Arc`.
///
/// Refreshes run while the lock is held so concurrent senders never request
/// two tokens for the same application.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: Mutex<HashMap<TokenCacheKey, AccessToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(name = "Resolve access token", skip(self, key, refresh))]
    pub async fn get_or_refresh<F, Fut>(
        &self,
        key: TokenCacheKey,
        refresh: F,
    ) -> Result<AccessToken, SendError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<AccessToken, SendError>> + Send,
    {
        let mut entries = self.entries.lock().await;
        match entries.get(&key) {
            Some(token) if !token.is_expired(Utc::now()) => {
                tracing::debug!("Using cached access token");
                return Ok(token.clone());
            }
            Some(_) => tracing::info!("Cached access token expired, refreshing"),
            None => tracing::info!("No cached access token, acquiring one"),
        }
        entries.remove(&key);

        let token = refresh().await?;
        if token.has_lapsed(Utc::now()) {
            return Err(SendError::auth(
                "token_expired",
                format!(
                    "Identity provider issued a token expiring at {}",
                    token.expires_at()
                ),
            ));
        }
        entries.insert(key, token.clone());
        Ok(token)
    }

    pub async fn invalidate(&self, key: &TokenCacheKey) {
        if self.entries.lock().await.remove(key).is_some() {
            tracing::info!("Access token evicted from cache");
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    #[cfg(test)]
    pub(crate) async fn insert(&self, key: TokenCacheKey, token: AccessToken) {
        self.entries.lock().await.insert(key, token);
    }

    #[cfg(test)]
    pub(crate) async fn peek(&self, key: &TokenCacheKey) -> Option<String> {
        use secrecy::ExposeSecret;
        self.entries
            .lock()
            .await
            .get(key)
            .map(|t| t.value().expose_secret().clone())
    }
}
