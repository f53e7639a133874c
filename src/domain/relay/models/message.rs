use crate::domain::email::EmailAddress;
use crate::domain::relay::errors::SendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    PlainText,
    Html,
}

/// A rendered email, ready for a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    from: EmailAddress,
    to: Vec<EmailAddress>,
    reply_to: Option<EmailAddress>,
    subject: String,
    body: String,
    content_type: ContentType,
}

impl OutboundMessage {
    pub fn new(
        from: EmailAddress,
        to: Vec<EmailAddress>,
        subject: impl Into<String>,
        body: impl Into<String>,
        content_type: ContentType,
    ) -> Result<Self, SendError> {
        if to.is_empty() {
            return Err(SendError::Configuration(
                "A notification needs at least one recipient".into(),
            ));
        }
        Ok(Self {
            from,
            to,
            reply_to: None,
            subject: subject.into(),
            body: body.into(),
            content_type,
        })
    }

    pub fn with_reply_to(self, reply_to: EmailAddress) -> Self {
        Self {
            reply_to: Some(reply_to),
            ..self
        }
    }

    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    pub fn reply_to(&self) -> Option<&EmailAddress> {
        self.reply_to.as_ref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}
