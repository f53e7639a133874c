use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone)]
pub struct OAuth2Credentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub tenant_id: String,
}

#[derive(Debug, Clone)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: Secret<String>,
}

/// The authentication variant a deployment relays mail with.
///
/// Chosen once when configuration is loaded, never re-derived per send.
#[derive(Debug, Clone)]
pub enum RelayCredentials {
    OAuth2(OAuth2Credentials),
    Password(PasswordCredentials),
}

/// Raw, possibly incomplete credential values as found in configuration.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub tenant_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
}

impl RelayCredentials {
    /// OAuth2 wins when all three of its fields are non-empty, a non-empty
    /// password comes next. Anything else leaves the relay unconfigured.
    pub fn select(sources: CredentialSources, default_username: &str) -> Option<RelayCredentials> {
        let client_id = non_empty(sources.client_id);
        let client_secret = sources
            .client_secret
            .filter(|s| !s.expose_secret().trim().is_empty());
        let tenant_id = non_empty(sources.tenant_id);

        if let (Some(client_id), Some(client_secret), Some(tenant_id)) =
            (client_id, client_secret, tenant_id)
        {
            return Some(RelayCredentials::OAuth2(OAuth2Credentials {
                client_id,
                client_secret,
                tenant_id,
            }));
        }

        let password = sources
            .password
            .filter(|s| !s.expose_secret().trim().is_empty())?;
        let username = non_empty(sources.username).unwrap_or_else(|| default_username.to_string());

        Some(RelayCredentials::Password(PasswordCredentials {
            username,
            password,
        }))
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            RelayCredentials::OAuth2(_) => AuthMode::OAuth2,
            RelayCredentials::Password(_) => AuthMode::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    OAuth2,
    Password,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::OAuth2 => write!(f, "oauth2"),
            AuthMode::Password => write!(f, "password"),
        }
    }
}

const MASK_MIN_LENGTH: usize = 12;

/// Preview of an identifier safe to print: first 8 and last 4 characters.
/// Short identifiers are not previewed at all.
pub fn mask_identifier(value: &str) -> Option<String> {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= MASK_MIN_LENGTH {
        return None;
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    Some(format!("{head}...{tail}"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
