use async_trait::async_trait;

use super::{
    errors::ContactError,
    models::contact::{ContactId, ContactRecord, NewContact, NewContactRequest},
};
use crate::domain::relay::errors::SendError;

/// Durable store of contact form submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    async fn insert(&self, contact: NewContact) -> Result<ContactRecord, ContactRepositoryError>;

    /// Newest submissions first, optionally only those with the given read flag.
    async fn recent(
        &self,
        limit: i64,
        read: Option<bool>,
    ) -> Result<Vec<ContactRecord>, ContactRepositoryError>;

    async fn set_read(&self, id: ContactId, read: bool) -> Result<(), ContactRepositoryError>;

    async fn set_notes(&self, id: ContactId, notes: String) -> Result<(), ContactRepositoryError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ContactRepositoryError {
    #[error("No contact message with id {0}")]
    NotFound(ContactId),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Best-effort side channel told about every stored submission.
#[async_trait]
pub trait ContactNotifier: Send + Sync + 'static {
    async fn notify(&self, contact: &ContactRecord) -> Result<(), SendError>;
}

#[async_trait]
pub trait ContactService: Send + Sync + 'static {
    async fn submit(&self, req: NewContactRequest) -> Result<ContactRecord, ContactError>;

    async fn recent(
        &self,
        limit: i64,
        read: Option<bool>,
    ) -> Result<Vec<ContactRecord>, ContactError>;

    async fn mark_read(&self, id: ContactId) -> Result<(), ContactError>;

    async fn mark_unread(&self, id: ContactId) -> Result<(), ContactError>;

    /// Replaces the internal notes kept alongside a submission.
    async fn update_notes(&self, id: ContactId, notes: String) -> Result<(), ContactError>;
}
