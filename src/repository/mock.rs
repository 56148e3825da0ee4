//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::lead::{Lead, LeadFields};
use crate::domain::types::LeadId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{LeadReader, LeadWriter};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, fields: &LeadFields) -> RepositoryResult<Option<LeadId>>;
        fn update_lead(&self, id: &LeadId, fields: &LeadFields) -> RepositoryResult<()>;
        fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()>;
    }
}
