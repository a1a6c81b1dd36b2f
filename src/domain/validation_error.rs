/// Why a submission was turned away. The messages are shown to visitors as is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Invalid email")]
    InvalidEmail,
}
