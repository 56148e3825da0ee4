use thiserror::Error;

use crate::domain::types::LeadId;
use crate::repository::errors::RepositoryError;

pub mod dashboard;
#[cfg(feature = "server")]
pub mod registry;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Form(String),

    /// The lead is not part of the currently loaded list.
    #[error("lead {0} is not loaded")]
    NotFoundLocally(LeadId),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
