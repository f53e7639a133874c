use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::contact::{models::contact::ContactRecord, ports::ContactNotifier};
use crate::domain::email::EmailAddress;
use crate::domain::relay::{
    errors::SendError,
    models::message::{ContentType, OutboundMessage},
    ports::{MailTransport, TokenProvider},
    service::Relay,
};

/// Emails the site admins about every new contact message.
#[derive(Debug)]
pub struct ContactAlert<P, T>
where
    P: TokenProvider,
    T: MailTransport,
{
    relay: Arc<Relay<P, T>>,
    sender: EmailAddress,
    recipients: Vec<EmailAddress>,
}

impl<P, T> ContactAlert<P, T>
where
    P: TokenProvider,
    T: MailTransport,
{
    pub fn new(
        relay: Arc<Relay<P, T>>,
        sender: EmailAddress,
        recipients: Vec<EmailAddress>,
    ) -> Self {
        Self {
            relay,
            sender,
            recipients,
        }
    }

    pub fn relay(&self) -> &Arc<Relay<P, T>> {
        &self.relay
    }

    fn compose(&self, record: &ContactRecord) -> Result<OutboundMessage, SendError> {
        let contact = &record.contact;
        let subject = format!("New Contact Form Submission: {}", contact.subject.as_ref());
        let phone = if contact.phone.is_provided() {
            contact.phone.as_ref()
        } else {
            "Not provided"
        };
        let body = format!(
            "You have received a new contact form submission:\n\n\
            Name: {}\n\
            Email: {}\n\
            Phone: {}\n\
            Subject: {}\n\
            Received: {}\n\n\
            Message:\n{}\n",
            contact.name,
            contact.email,
            phone,
            contact.subject.as_ref(),
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            contact.message.as_ref(),
        );

        Ok(OutboundMessage::new(
            self.sender.clone(),
            self.recipients.clone(),
            subject,
            body,
            ContentType::PlainText,
        )?
        .with_reply_to(contact.email.clone()))
    }
}

#[async_trait]
impl<P, T> ContactNotifier for ContactAlert<P, T>
where
    P: TokenProvider,
    T: MailTransport,
{
    #[tracing::instrument(
        name = "Notify admins about a contact message",
        skip(self, contact),
        fields(contact_id = %contact.id)
    )]
    async fn notify(&self, contact: &ContactRecord) -> Result<(), SendError> {
        let message = self.compose(contact)?;
        self.relay.send(message).await
    }
}
