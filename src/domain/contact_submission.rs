use super::{
    ContactEmail, ContactMessage, ContactName, ContactSubject, Field, FieldError, FieldErrors,
};
use utoipa::ToSchema;

/// Raw contact form input, exactly as typed by the visitor.
/// Missing fields are treated as empty so they fail validation like blank
/// ones instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    #[schema(example = "Jane")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Hi")]
    pub subject: String,
    #[schema(example = "Hello there, this is long enough.")]
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }
}

/// A contact form submission where every field satisfies its rules.
/// Only ever lives for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

impl ContactSubmission {
    /// Validate every field of the form, collecting one error per offending
    /// field rather than stopping at the first.
    pub fn parse(form: ContactForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = ContactName::parse(form.name).map_err(|e| errors.push(e));
        let email = ContactEmail::parse(form.email).map_err(|e| errors.push(e));
        let subject = ContactSubject::parse(form.subject).map_err(|e| errors.push(e));
        let message = ContactMessage::parse(form.message).map_err(|e| errors.push(e));

        match (name, email, subject, message) {
            (Ok(name), Ok(email), Ok(subject), Ok(message)) => Ok(Self {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = FieldErrors;

    fn try_from(value: ContactForm) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<&ContactSubmission> for ContactForm {
    fn from(value: &ContactSubmission) -> Self {
        Self {
            name: value.name.as_ref().to_string(),
            email: value.email.as_ref().to_string(),
            subject: value.subject.as_ref().to_string(),
            message: value.message.as_ref().to_string(),
        }
    }
}

/// Check a single field in isolation, as done when a field loses focus.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    let value = value.to_string();
    match field {
        Field::Name => ContactName::parse(value).map(|_| ()),
        Field::Email => ContactEmail::parse(value).map(|_| ()),
        Field::Subject => ContactSubject::parse(value).map(|_| ()),
        Field::Message => ContactMessage::parse(value).map(|_| ()),
    }
}
