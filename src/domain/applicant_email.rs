use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

// Counted in UTF-16 code units, as the browser form counts it.
const MAX_EMAIL_LENGTH: usize = 254;

// A sanity check on the shape only, not RFC 5322.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email shape regex is valid"));

/// An email address left by a visitor on the waitlist form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantEmail(String);

impl ApplicantEmail {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        let is_too_long = s.encode_utf16().count() > MAX_EMAIL_LENGTH;

        if is_too_long || !EMAIL_SHAPE.is_match(&s) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for ApplicantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicantEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApplicantEmail {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ApplicantEmail::parse(value)
    }
}
