use std::fmt::Display;

/// The four inputs of the contact form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        };
        write!(f, "{label}")
    }
}

/// A single rule violation, displayed inline next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least {min} characters long", min = crate::domain::ContactMessage::MIN_LENGTH)]
    MessageTooShort,
    #[error("{0} must be at most {max} characters long", max = crate::domain::ContactName::MAX_LENGTH)]
    TooLong(Field),
}

impl FieldError {
    /// The field this error should be attached to.
    pub fn field(&self) -> Field {
        match self {
            Self::Required(field) | Self::TooLong(field) => *field,
            Self::InvalidEmail => Field::Email,
            Self::MessageTooShort => Field::Message,
        }
    }
}

/// Every rule violation found in one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first() {
            Some(error) => write!(f, "{error}"),
            None => write!(f, "No validation errors"),
        }
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
