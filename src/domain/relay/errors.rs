#[derive(thiserror::Error, Debug)]
pub enum SendError {
    #[error("Relay is not configured: {0}")]
    Configuration(String),
    #[error("Authentication failed ({code}): {description}")]
    Auth { code: String, description: String },
    #[error("Could not reach the mail server: {0}")]
    Connection(String),
    #[error("Mail server rejected the message: {0}")]
    Transmission(String),
}

impl SendError {
    pub fn auth(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Auth {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Short label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            SendError::Configuration(_) => "configuration_error",
            SendError::Auth { .. } => "auth_error",
            SendError::Connection(_) => "connection_error",
            SendError::Transmission(_) => "transmission_error",
        }
    }
}
