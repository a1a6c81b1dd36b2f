use actix_web::{HttpResponse, web};
use anyhow::Context;

use super::{errors::EarlyAccessError, types::SuccessBody};
use crate::{
    domain::{NotificationMessage, NotificationRouting, SubmissionRequest},
    email_client::EmailSender,
};

#[tracing::instrument(
    name = "Registering an early-access signup",
    skip(body, email_client, routing),
    fields(applicant_email = tracing::field::Empty)
)]
pub async fn early_access(
    body: web::Bytes,
    email_client: web::Data<dyn EmailSender>,
    routing: web::Data<NotificationRouting>,
) -> Result<HttpResponse, EarlyAccessError> {
    let payload: serde_json::Value =
        serde_json::from_slice(&body).context("Failed to parse the request body as JSON.")?;

    let submission =
        SubmissionRequest::parse(&payload).map_err(EarlyAccessError::ValidationError)?;
    tracing::Span::current().record(
        "applicant_email",
        tracing::field::display(&submission.email),
    );

    let message = NotificationMessage::for_submission(&routing, &submission)
        .context("Failed to render the notification email.")?;

    match email_client.send_email(message).await {
        Ok(()) => Ok(HttpResponse::Ok().json(SuccessBody { success: true })),
        Err(e) if e.is_delivery_failure() => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Email provider failed to deliver the signup notification"
            );
            Err(EarlyAccessError::DeliveryError(e))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context("Failed to send the signup notification.")
            .into()),
    }
}
