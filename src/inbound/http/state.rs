use crate::domain::contact::ports::ContactService;
use crate::inbound::http::auth::AdminCredentials;
use std::sync::Arc;

#[derive(Debug)]
pub struct ContactState<CS: ContactService> {
    contact_service: CS,
    admin: AdminCredentials,
}

#[derive(Debug)]
pub struct SharedContactState<CS: ContactService>(Arc<ContactState<CS>>);

impl<CS: ContactService> Clone for SharedContactState<CS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<CS: ContactService> SharedContactState<CS> {
    pub fn new(contact_service: CS, admin: AdminCredentials) -> Self {
        Self(Arc::new(ContactState {
            contact_service,
            admin,
        }))
    }

    pub fn contact_service(&self) -> &CS {
        &self.0.contact_service
    }

    pub fn admin(&self) -> &AdminCredentials {
        &self.0.admin
    }
}
