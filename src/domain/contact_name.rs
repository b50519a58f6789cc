use super::{Field, FieldError};
use unicode_segmentation::UnicodeSegmentation;

/// The submitter's name, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// Upper bound, in graphemes, for the short single-line fields.
    pub const MAX_LENGTH: usize = 256;

    pub fn parse(s: String) -> Result<Self, FieldError> {
        parse_short_text(&s, Field::Name).map(Self)
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shared rules for single-line inputs: required once trimmed, and bounded
/// in length. Graphemes are counted since some characters are perceived as a
/// single character but are composed of several code points.
pub(super) fn parse_short_text(s: &str, field: Field) -> Result<String, FieldError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err(FieldError::Required(field))
    } else if trimmed.graphemes(true).count() > ContactName::MAX_LENGTH {
        Err(FieldError::TooLong(field))
    } else {
        Ok(trimmed.to_string())
    }
}
