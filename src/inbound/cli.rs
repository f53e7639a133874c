//! Plain-text diagnostics printed by the `test_email` binary.

use secrecy::ExposeSecret;

use crate::configuration::RelaySettings;
use crate::domain::relay::models::credentials::{mask_identifier, AuthMode};

/// One line of the credential status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStatus {
    pub variable: &'static str,
    pub is_set: bool,
    pub preview: Option<String>,
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_set { "✓ Set" } else { "✗ Not Set" };
        write!(f, "  {}: {}", self.variable, status)?;
        if let Some(preview) = &self.preview {
            write!(f, " ({preview})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigurationReport {
    pub auth_mode: Option<AuthMode>,
    pub sender: String,
    pub smtp_user: String,
    pub recipient: Option<String>,
    pub credentials: Vec<CredentialStatus>,
}

fn is_set(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn identifier(variable: &'static str, value: Option<&str>) -> CredentialStatus {
    let is_set = is_set(value);
    CredentialStatus {
        variable,
        is_set,
        preview: value.filter(|_| is_set).and_then(|v| mask_identifier(v.trim())),
    }
}

fn secret(variable: &'static str, value: Option<&str>) -> CredentialStatus {
    let is_set = is_set(value);
    CredentialStatus {
        variable,
        is_set,
        preview: is_set.then(|| "***hidden***".to_string()),
    }
}

impl ConfigurationReport {
    pub fn new(settings: &RelaySettings, recipient: Option<String>) -> Self {
        let client_secret = settings
            .client_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str());
        let password = settings
            .password
            .as_ref()
            .map(|s| s.expose_secret().as_str());

        Self {
            auth_mode: settings.credentials().map(|c| c.mode()),
            sender: settings.sender_email.clone(),
            smtp_user: settings.smtp_user(),
            recipient,
            credentials: vec![
                identifier("MICROSOFT_CLIENT_ID", settings.client_id.as_deref()),
                secret("MICROSOFT_CLIENT_SECRET", client_secret),
                identifier("MICROSOFT_TENANT_ID", settings.tenant_id.as_deref()),
                secret("EMAIL_PASSWORD", password),
            ],
        }
    }

    pub fn missing(&self) -> impl Iterator<Item = &CredentialStatus> {
        self.credentials.iter().filter(|c| !c.is_set)
    }
}

impl std::fmt::Display for ConfigurationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  From: {}", self.sender)?;
        writeln!(f, "  SMTP user: {}", self.smtp_user)?;
        writeln!(
            f,
            "  To: {}",
            self.recipient.as_deref().unwrap_or("(no recipient configured)")
        )?;
        let mode = match self.auth_mode {
            Some(AuthMode::OAuth2) => "OAuth2 (client credentials + XOAUTH2)",
            Some(AuthMode::Password) => "Password (SMTP AUTH)",
            None => "Not configured",
        };
        writeln!(f, "  Authentication: {mode}")?;
        writeln!(f)?;
        writeln!(f, "Credentials Status:")?;
        for status in &self.credentials {
            writeln!(f, "{status}")?;
        }
        Ok(())
    }
}

pub fn troubleshooting_tips(mode: AuthMode) -> &'static [&'static str] {
    match mode {
        AuthMode::OAuth2 => &[
            "OAuth2 Authentication Issues:",
            "  1. Verify MICROSOFT_CLIENT_ID, MICROSOFT_CLIENT_SECRET and MICROSOFT_TENANT_ID",
            "  2. Check the Azure App Registration has the SMTP.SendAsApp permission",
            "  3. Confirm admin consent has been granted for the tenant",
            "  4. Ensure the client secret has not expired",
            "  5. Register the service principal in Exchange Online and grant it mailbox access",
        ],
        AuthMode::Password => &[
            "Password Authentication Issues:",
            "  1. Verify EMAIL_PASSWORD is set correctly",
            "  2. Ensure you are using a Microsoft 365 app password",
            "  3. Check that SMTP AUTH is enabled for the mailbox",
            "  4. Verify EMAIL_HOST_USER or DEFAULT_FROM_EMAIL names that mailbox",
        ],
    }
}
