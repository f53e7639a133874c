use validator::validate_email;

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trims and lower-cases the input before validating it.
    pub fn parse(s: String) -> Result<EmailAddress, EmailError> {
        let normalized = s.trim().to_lowercase();
        if validate_email(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(EmailError::InvalidAddress(format!(
                "{} is not a valid email",
                s
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EmailAddress::parse(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EmailAddress::parse(value.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}
