use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::types::ErrorBody;
use crate::{domain::ValidationError, email_client::SendEmailError, routes::error_chain_fmt};

/// Everything that can go wrong while taking an early-access signup.
/// Only the `Display` text reaches the caller; causes stay in the logs.
#[derive(thiserror::Error)]
pub enum EarlyAccessError {
    #[error("{0}")]
    ValidationError(ValidationError),
    #[error("Email failed to send")]
    DeliveryError(#[source] SendEmailError),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for EarlyAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for EarlyAccessError {
    fn status_code(&self) -> StatusCode {
        match self {
            EarlyAccessError::ValidationError(_) => StatusCode::BAD_REQUEST,
            EarlyAccessError::DeliveryError(_) | EarlyAccessError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
