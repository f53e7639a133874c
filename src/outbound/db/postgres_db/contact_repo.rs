use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PostgresDb;
use crate::domain::contact::{
    models::contact::{ContactId, ContactRecord, NewContact, NewContactRequest},
    ports::{ContactRepository, ContactRepositoryError},
};

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
    read: bool,
    notes: String,
}

impl TryFrom<ContactRow> for ContactRecord {
    type Error = ContactRepositoryError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let request = NewContactRequest::new(&row.name, &row.email, &row.subject, &row.message)
            .with_phone(&row.phone);
        let contact = NewContact::try_from(request)
            .with_context(|| format!("Stored contact message {} is no longer valid", row.id))?;

        Ok(ContactRecord {
            id: row.id,
            contact,
            created_at: row.created_at,
            read: row.read,
            notes: row.notes,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresDb {
    #[tracing::instrument(name = "Saving new contact message in db", skip(self, contact))]
    async fn insert(&self, contact: NewContact) -> Result<ContactRecord, ContactRepositoryError> {
        let record = ContactRecord::new(contact);
        sqlx::query(
            r#"
        INSERT INTO contact_messages
            (id, name, email, phone, subject, message, created_at, read, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
        )
        .bind(record.id)
        .bind(record.contact.name.as_ref())
        .bind(record.contact.email.as_ref())
        .bind(record.contact.phone.as_ref())
        .bind(record.contact.subject.as_ref())
        .bind(record.contact.message.as_ref())
        .bind(record.created_at)
        .bind(record.read)
        .bind(&record.notes)
        .execute(self.pool())
        .await
        .context("Failed to insert a new contact message in the database")?;

        Ok(record)
    }

    #[tracing::instrument(name = "Fetching recent contact messages", skip(self))]
    async fn recent(
        &self,
        limit: i64,
        read: Option<bool>,
    ) -> Result<Vec<ContactRecord>, ContactRepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"SELECT id, name, email, phone, subject, message, created_at, read, notes
            FROM contact_messages
            WHERE $1::BOOLEAN IS NULL OR read = $1
            ORDER BY created_at DESC LIMIT $2"#,
        )
        .bind(read)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .context("Failed to read contact messages from the database")?;

        rows.into_iter().map(ContactRecord::try_from).collect()
    }

    #[tracing::instrument(name = "Updating contact message read flag", skip(self))]
    async fn set_read(&self, id: ContactId, read: bool) -> Result<(), ContactRepositoryError> {
        let result = sqlx::query(r#"UPDATE contact_messages SET read = $1 WHERE id = $2"#)
            .bind(read)
            .bind(id)
            .execute(self.pool())
            .await
            .context("Failed to update contact message in the database")?;

        if result.rows_affected() == 0 {
            return Err(ContactRepositoryError::NotFound(id));
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating contact message notes", skip(self, notes))]
    async fn set_notes(&self, id: ContactId, notes: String) -> Result<(), ContactRepositoryError> {
        let result = sqlx::query(r#"UPDATE contact_messages SET notes = $1 WHERE id = $2"#)
            .bind(notes)
            .bind(id)
            .execute(self.pool())
            .await
            .context("Failed to update contact message notes in the database")?;

        if result.rows_affected() == 0 {
            return Err(ContactRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
