use crate::domain::contact::models::contact::ContactValidationError;
use crate::domain::contact::ports::ContactRepositoryError;

#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Contact message not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ContactValidationError> for ContactError {
    fn from(error: ContactValidationError) -> Self {
        Self::ValidationError(error.to_string())
    }
}

impl From<ContactRepositoryError> for ContactError {
    fn from(error: ContactRepositoryError) -> Self {
        match error {
            ContactRepositoryError::NotFound(id) => Self::NotFound(id.to_string()),
            ContactRepositoryError::Unexpected(e) => Self::Unexpected(e),
        }
    }
}
