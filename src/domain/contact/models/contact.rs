use chrono::{DateTime, Utc};

use super::{
    fields::{ContactFieldError, ContactMessage, ContactPhone, ContactSubject},
    name::{ContactName, ContactNameError},
};
use crate::domain::email::{EmailAddress, EmailError};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct NewContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewContactRequest {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> NewContactRequest {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    pub fn with_phone(self, phone: &str) -> Self {
        Self {
            phone: Some(phone.to_string()),
            ..self
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContactValidationError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] ContactNameError),
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("{0}")]
    InvalidField(#[from] ContactFieldError),
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: ContactPhone,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

impl NewContact {
    pub fn new(req: NewContactRequest) -> Result<NewContact, ContactValidationError> {
        Ok(Self {
            name: ContactName::parse(req.name)?,
            email: EmailAddress::parse(req.email)?,
            phone: ContactPhone::parse(req.phone)?,
            subject: ContactSubject::parse(req.subject)?,
            message: ContactMessage::parse(req.message)?,
        })
    }
}

impl TryFrom<NewContactRequest> for NewContact {
    type Error = ContactValidationError;
    fn try_from(request: NewContactRequest) -> Result<Self, Self::Error> {
        NewContact::new(request)
    }
}

pub type ContactId = uuid::Uuid;

/// A stored submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub id: ContactId,
    pub contact: NewContact,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub notes: String,
}

impl ContactRecord {
    pub fn new(contact: NewContact) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            contact,
            created_at: Utc::now(),
            read: false,
            notes: String::new(),
        }
    }
}

impl std::fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.contact.name,
            self.contact.subject.as_ref(),
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}
