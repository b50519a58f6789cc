use super::{Field, FieldError};

/// The free-text body of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Minimum number of characters once surrounding whitespace is removed.
    pub const MIN_LENGTH: usize = 10;

    pub fn parse(s: String) -> Result<Self, FieldError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(FieldError::Required(Field::Message))
        } else if trimmed.chars().count() < Self::MIN_LENGTH {
            Err(FieldError::MessageTooShort)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
