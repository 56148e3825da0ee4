use crate::{
    domain::{
        lead::{Lead, LeadFields},
        types::LeadId,
    },
    repository::errors::RepositoryResult,
};

#[cfg(feature = "server")]
pub mod api;
pub mod envelope;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub trait LeadReader {
    /// Fetches every lead in the sheet.
    fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    /// Appends a lead, returning its identifier when the store reports one.
    fn create_lead(&self, fields: &LeadFields) -> RepositoryResult<Option<LeadId>>;
    fn update_lead(&self, id: &LeadId, fields: &LeadFields) -> RepositoryResult<()>;
    fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()>;
}

/// A complete record store that can be shared across request threads.
pub trait LeadStore: LeadReader + LeadWriter + Send + Sync {}

impl<T> LeadStore for T where T: LeadReader + LeadWriter + Send + Sync {}
