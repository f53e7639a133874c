use crate::{
    domain::contact::{models::contact::NewContactRequest, ports::ContactService},
    inbound::http::{errors::AppError, state::SharedContactState},
};
use actix_web::{web, HttpResponse};

#[tracing::instrument(
    name = "Receiving a contact form submission",
    skip(contact_request, state),
    fields(
        contact_email = %contact_request.email,
        contact_name = %contact_request.name,
    )
)]
pub async fn submit_contact<CS: ContactService>(
    contact_request: web::Form<NewContactRequest>,
    state: web::Data<SharedContactState<CS>>,
) -> Result<HttpResponse, AppError> {
    let contact_request = contact_request.into_inner();
    state.contact_service().submit(contact_request).await?;

    Ok(HttpResponse::Ok().finish())
}
