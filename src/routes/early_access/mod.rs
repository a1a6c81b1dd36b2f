mod early_access_handler;
mod errors;
mod types;

pub use early_access_handler::early_access;
pub use errors::EarlyAccessError;
pub use types::{ErrorBody, SuccessBody};
