mod applicant_email;
mod notification;
mod submission;
mod validation_error;

pub use applicant_email::ApplicantEmail;
pub use notification::{
    DEFAULT_RECIPIENT, DEFAULT_SENDER, NOTIFICATION_SUBJECT, NotificationMessage,
    NotificationRouting,
};
pub use submission::SubmissionRequest;
pub use validation_error::ValidationError;
