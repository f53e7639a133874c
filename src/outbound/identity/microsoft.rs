use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::relay::{
    errors::SendError,
    models::{credentials::OAuth2Credentials, token::AccessToken},
    ports::TokenProvider,
};

const AUTHORITY: &str = "https://login.microsoftonline.com";
const OUTLOOK_SCOPE: &str = "https://outlook.office365.com/.default";

/// Client-credentials grant against the Microsoft identity platform.
#[derive(Debug, Clone)]
pub struct MicrosoftIdentityClient {
    http_client: Client,
    authority: String,
}

impl MicrosoftIdentityClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self, SendError> {
        Self::with_authority(AUTHORITY, timeout)
    }

    /// Points the client at another authority, e.g. a mock server in tests.
    pub fn with_authority(
        authority: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, SendError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            authority: authority.into().trim_end_matches('/').to_string(),
        })
    }

    fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority, tenant_id)
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    expires_in: i64,
}

#[derive(serde::Deserialize, Default)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[async_trait]
impl TokenProvider for MicrosoftIdentityClient {
    #[tracing::instrument(
        name = "Request access token",
        skip(self, credentials),
        fields(tenant_id = %credentials.tenant_id)
    )]
    async fn acquire_token(
        &self,
        credentials: &OAuth2Credentials,
    ) -> Result<AccessToken, SendError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose_secret().as_str()),
            ("scope", OUTLOOK_SCOPE),
        ];

        let response = self
            .http_client
            .post(self.token_url(&credentials.tenant_id))
            .form(&form)
            .send()
            .await
            .map_err(|e| SendError::auth("request_failed", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SendError::auth("request_failed", e.to_string()))?;

        if let Ok(token) = serde_json::from_str::<TokenResponse>(&body) {
            tracing::info!(expires_in = token.expires_in, "Access token acquired");
            return Ok(AccessToken::issued_now(token.access_token, token.expires_in));
        }

        let rejection: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
        let code = rejection.error.unwrap_or_else(|| "unknown_error".into());
        let description = rejection
            .error_description
            .unwrap_or_else(|| format!("Token endpoint answered {status} without an access token"));
        tracing::error!(error.code = %code, %status, "Token request rejected");
        Err(SendError::Auth { code, description })
    }
}
