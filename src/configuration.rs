use crate::domain::email::{EmailAddress, EmailError};
use crate::domain::relay::models::credentials::{CredentialSources, RelayCredentials};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub relay: RelaySettings,
    pub general: GeneralSettings,
}

impl Settings {
    pub fn log_level(&self) -> String {
        self.general.log_level.clone()
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GeneralSettings {
    pub log_level: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub admin_username: String,
    pub admin_password_hash: Secret<String>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RelaySettings {
    pub sender_email: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<Secret<String>>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl RelaySettings {
    pub fn sender(&self) -> Result<EmailAddress, EmailError> {
        EmailAddress::parse(self.sender_email.clone())
    }

    pub fn recipients(&self) -> Result<Vec<EmailAddress>, EmailError> {
        self.recipients
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| EmailAddress::parse(r.clone()))
            .collect()
    }

    /// Mailbox the SMTP session logs in as; defaults to the sender.
    pub fn smtp_user(&self) -> String {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.sender_email.trim())
            .to_string()
    }

    pub fn credentials(&self) -> Option<RelayCredentials> {
        let sources = CredentialSources {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            tenant_id: self.tenant_id.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };
        RelayCredentials::select(sources, &self.smtp_user())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Plain variable names the relay honours on top of `APP_` prefixed overrides.
const RELAY_ENVIRONMENT_OVERRIDES: [(&str, &str); 6] = [
    ("MICROSOFT_CLIENT_ID", "relay.client_id"),
    ("MICROSOFT_CLIENT_SECRET", "relay.client_secret"),
    ("MICROSOFT_TENANT_ID", "relay.tenant_id"),
    ("EMAIL_PASSWORD", "relay.password"),
    ("EMAIL_HOST_USER", "relay.username"),
    ("DEFAULT_FROM_EMAIL", "relay.sender_email"),
];

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    for (variable, key) in RELAY_ENVIRONMENT_OVERRIDES {
        if let Ok(value) = std::env::var(variable) {
            settings.set(key, value)?;
        }
    }
    if let Ok(admin_email) = std::env::var("ADMIN_EMAIL") {
        settings.set("relay.recipients", vec![admin_email])?;
    }

    settings.try_into()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
