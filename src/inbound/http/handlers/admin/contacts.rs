use crate::{
    domain::contact::{
        models::contact::{ContactId, ContactRecord},
        ports::ContactService,
    },
    inbound::http::{errors::AppError, state::SharedContactState},
};
use actix_web::{web, HttpRequest, HttpResponse};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

#[derive(serde::Deserialize)]
pub struct ListParameters {
    limit: Option<i64>,
    read: Option<bool>,
}

#[derive(serde::Deserialize)]
pub struct NotesForm {
    notes: String,
}

/// JSON shape of a stored contact message.
#[derive(serde::Serialize)]
struct ContactView {
    id: String,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    created_at: String,
    read: bool,
    notes: String,
}

impl From<ContactRecord> for ContactView {
    fn from(record: ContactRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.contact.name.as_ref().to_string(),
            email: record.contact.email.as_ref().to_string(),
            phone: record.contact.phone.as_ref().to_string(),
            subject: record.contact.subject.as_ref().to_string(),
            message: record.contact.message.as_ref().to_string(),
            created_at: record.created_at.to_rfc3339(),
            read: record.read,
            notes: record.notes,
        }
    }
}

#[tracing::instrument(name = "List contact messages", skip(parameters, state, request))]
pub async fn list_contacts<CS: ContactService>(
    parameters: web::Query<ListParameters>,
    state: web::Data<SharedContactState<CS>>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    state.admin().authorize(&request).await?;

    let limit = parameters.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let contacts: Vec<ContactView> = state
        .contact_service()
        .recent(limit, parameters.read)
        .await?
        .into_iter()
        .map(ContactView::from)
        .collect();

    Ok(HttpResponse::Ok().json(contacts))
}

#[tracing::instrument(name = "Mark contact message read", skip(state, request))]
pub async fn mark_contact_read<CS: ContactService>(
    id: web::Path<ContactId>,
    state: web::Data<SharedContactState<CS>>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    state.admin().authorize(&request).await?;
    state.contact_service().mark_read(id.into_inner()).await?;

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(name = "Mark contact message unread", skip(state, request))]
pub async fn mark_contact_unread<CS: ContactService>(
    id: web::Path<ContactId>,
    state: web::Data<SharedContactState<CS>>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    state.admin().authorize(&request).await?;
    state.contact_service().mark_unread(id.into_inner()).await?;

    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(name = "Update contact message notes", skip(form, state, request))]
pub async fn update_contact_notes<CS: ContactService>(
    id: web::Path<ContactId>,
    form: web::Form<NotesForm>,
    state: web::Data<SharedContactState<CS>>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    state.admin().authorize(&request).await?;
    state
        .contact_service()
        .update_notes(id.into_inner(), form.into_inner().notes)
        .await?;

    Ok(HttpResponse::Ok().finish())
}
