use super::{contact_name::parse_short_text, Field, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

impl ContactSubject {
    pub fn parse(s: String) -> Result<Self, FieldError> {
        parse_short_text(&s, Field::Subject).map(Self)
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
