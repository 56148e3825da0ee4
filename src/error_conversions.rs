//! Error conversion glue between the form and service layers.

use crate::forms::FormError;
use crate::services::ServiceError;

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
