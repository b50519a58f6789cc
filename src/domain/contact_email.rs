use super::{Field, FieldError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

lazy_static! {
    /// Local part, an `@`, then a domain with at least one inner dot.
    /// Neither part may contain whitespace or another `@`.
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern to be a valid regex");
}

/// A syntactically valid, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<Self, FieldError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(FieldError::Required(Field::Email))
        } else if EMAIL_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(FieldError::InvalidEmail)
        }
    }
}

impl Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
