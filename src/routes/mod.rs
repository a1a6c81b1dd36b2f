mod early_access;
mod health_check;
mod helpers;

pub use early_access::{EarlyAccessError, ErrorBody, SuccessBody, early_access};
pub use health_check::health_check;
pub use helpers::error_chain_fmt;
