use serde_json::Value;

use super::{ApplicantEmail, ValidationError};

/// A waitlist form submission that passed validation.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub email: ApplicantEmail,
    /// Where on the page the form was filled in, if the page said so.
    pub source: Option<String>,
}

impl SubmissionRequest {
    /// Validates a decoded JSON body. Any JSON value is accepted: a body
    /// that is not an object simply has no `email` field.
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let email = match body.get("email").and_then(Value::as_str) {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => return Err(ValidationError::MissingEmail),
        };
        let email = ApplicantEmail::parse(email)?;

        let source = body
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        Ok(Self { email, source })
    }
}

impl TryFrom<Value> for SubmissionRequest {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        SubmissionRequest::parse(&value)
    }
}
