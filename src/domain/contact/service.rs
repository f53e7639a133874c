use async_trait::async_trait;
use std::sync::Arc;

use super::{
    errors::ContactError,
    models::contact::{ContactId, ContactRecord, NewContact, NewContactRequest},
    ports::{ContactNotifier, ContactRepository, ContactService},
};

#[derive(Debug)]
pub struct ContactInbox<R, N>
where
    R: ContactRepository,
    N: ContactNotifier,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
}

impl<R, N> ContactInbox<R, N>
where
    R: ContactRepository,
    N: ContactNotifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }
}

impl<R, N> Clone for ContactInbox<R, N>
where
    R: ContactRepository,
    N: ContactNotifier,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

#[async_trait]
impl<R, N> ContactService for ContactInbox<R, N>
where
    R: ContactRepository,
    N: ContactNotifier,
{
    #[tracing::instrument(
        name = "Submit a contact message",
        skip(self, req),
        fields(contact_id = tracing::field::Empty)
    )]
    async fn submit(&self, req: NewContactRequest) -> Result<ContactRecord, ContactError> {
        let contact = NewContact::try_from(req)?;
        let record = self.repo.insert(contact).await?;
        tracing::Span::current().record("contact_id", tracing::field::display(&record.id));

        // The record is already stored; a failed notification must not change the outcome.
        if let Err(error) = self.notifier.notify(&record).await {
            tracing::warn!(
                error.kind = error.kind(),
                error.cause_chain = ?error,
                "Contact message saved but the notification email was not sent",
            );
        }

        Ok(record)
    }

    #[tracing::instrument(name = "List recent contact messages", skip(self))]
    async fn recent(
        &self,
        limit: i64,
        read: Option<bool>,
    ) -> Result<Vec<ContactRecord>, ContactError> {
        Ok(self.repo.recent(limit, read).await?)
    }

    #[tracing::instrument(name = "Mark contact message as read", skip(self))]
    async fn mark_read(&self, id: ContactId) -> Result<(), ContactError> {
        Ok(self.repo.set_read(id, true).await?)
    }

    #[tracing::instrument(name = "Mark contact message as unread", skip(self))]
    async fn mark_unread(&self, id: ContactId) -> Result<(), ContactError> {
        Ok(self.repo.set_read(id, false).await?)
    }

    #[tracing::instrument(name = "Update contact message notes", skip(self, notes))]
    async fn update_notes(&self, id: ContactId, notes: String) -> Result<(), ContactError> {
        Ok(self.repo.set_notes(id, notes.trim().to_string()).await?)
    }
}
