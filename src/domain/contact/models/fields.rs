use unicode_segmentation::UnicodeSegmentation;

#[derive(thiserror::Error, Debug)]
pub enum ContactFieldError {
    #[error("Subject cannot be empty.")]
    EmptySubject,
    #[error("Subject must be at least {} characters long.", ContactSubject::MIN_LENGTH)]
    SubjectTooShort,
    #[error("Subject is too long. Maximum {} characters.", ContactSubject::MAX_LENGTH)]
    SubjectTooLong,
    #[error("Message cannot be empty.")]
    EmptyMessage,
    #[error("Message must be at least {} characters long.", ContactMessage::MIN_LENGTH)]
    MessageTooShort,
    #[error("Phone number is too long. Maximum {} characters.", ContactPhone::MAX_LENGTH)]
    PhoneTooLong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubject(String);

impl ContactSubject {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 300;

    pub fn parse(s: String) -> Result<ContactSubject, ContactFieldError> {
        let subject = s.trim();
        let length = subject.graphemes(true).count();
        if length == 0 {
            return Err(ContactFieldError::EmptySubject);
        }
        if length < Self::MIN_LENGTH {
            return Err(ContactFieldError::SubjectTooShort);
        }
        if length > Self::MAX_LENGTH {
            return Err(ContactFieldError::SubjectTooLong);
        }
        Ok(Self(subject.to_string()))
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage(String);

impl ContactMessage {
    const MIN_LENGTH: usize = 10;

    pub fn parse(s: String) -> Result<ContactMessage, ContactFieldError> {
        let message = s.trim();
        let length = message.graphemes(true).count();
        if length == 0 {
            return Err(ContactFieldError::EmptyMessage);
        }
        if length < Self::MIN_LENGTH {
            return Err(ContactFieldError::MessageTooShort);
        }
        Ok(Self(message.to_string()))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Optional phone number; an empty value means none was given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactPhone(String);

impl ContactPhone {
    const MAX_LENGTH: usize = 20;

    pub fn parse(s: Option<String>) -> Result<ContactPhone, ContactFieldError> {
        let phone = s.as_deref().unwrap_or_default().trim();
        if phone.graphemes(true).count() > Self::MAX_LENGTH {
            return Err(ContactFieldError::PhoneTooLong);
        }
        Ok(Self(phone.to_string()))
    }

    pub fn is_provided(&self) -> bool {
        !self.0.is_empty()
    }
}

impl AsRef<str> for ContactPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
