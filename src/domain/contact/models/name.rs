use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum ContactNameError {
    #[error("Name cannot be empty.")]
    Empty,
    #[error(
        "Name must be at least {} characters long.",
        ContactName::MIN_LENGTH
    )]
    TooShort,
    #[error(
        "Name is too long (maximum allowed is {} characters).",
        ContactName::MAX_LENGTH
    )]
    TooLong,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ContactName(String);

impl ContactName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 200;

    /// Returns the trimmed name if it satisfies our length constraints.
    pub fn parse(s: String) -> Result<ContactName, ContactNameError> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ContactNameError::Empty);
        }
        let length = name.graphemes(true).count();
        if length < ContactName::MIN_LENGTH {
            return Err(ContactNameError::TooShort);
        }
        if length > ContactName::MAX_LENGTH {
            return Err(ContactNameError::TooLong);
        }
        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
