//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod lead;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Client Name is required")]
    MissingClientName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
}

impl FormError {
    /// Collapses validator output into the first message a user should see.
    pub fn from_validation(errors: ValidationErrors) -> Self {
        let fields = errors.field_errors();
        if fields.contains_key("client_name") {
            FormError::MissingClientName
        } else if fields.contains_key("email") {
            FormError::InvalidEmail
        } else if fields.contains_key("quoted_price") {
            FormError::InvalidNumber("Quoted Price")
        } else if fields.contains_key("order_value") {
            FormError::InvalidNumber("Order Value (Ksh)")
        } else {
            FormError::Validation(errors)
        }
    }
}
