//! In-memory record store shared by integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use leads_dashboard::domain::lead::{Lead, LeadField, LeadFields};
use leads_dashboard::domain::types::LeadId;
use leads_dashboard::repository::errors::{RepositoryError, RepositoryResult};
use leads_dashboard::repository::{LeadReader, LeadWriter};

/// Behaves like the spreadsheet service: numeric ids, rows keyed by header.
#[derive(Default)]
pub struct InMemoryStore {
    leads: Mutex<Vec<Lead>>,
    next_id: Mutex<i64>,
    failure: Mutex<Option<RepositoryError>>,
    list_calls: Mutex<usize>,
}

impl InMemoryStore {
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        let next_id = leads.len() as i64 + 1;
        Self {
            leads: Mutex::new(leads),
            next_id: Mutex::new(next_id),
            ..Self::default()
        }
    }

    /// Makes the next store call fail with `error`.
    pub fn fail_next(&self, error: RepositoryError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }

    fn take_failure(&self) -> RepositoryResult<()> {
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(leads: &[Lead], id: &LeadId) -> RepositoryResult<usize> {
        leads
            .iter()
            .position(|lead| lead.id().as_ref() == Some(id))
            .ok_or_else(|| RepositoryError::Application(format!("Lead ID {id} not found")))
    }
}

fn apply(mut lead: Lead, fields: &LeadFields) -> Lead {
    for field in LeadField::EDITABLE {
        lead = lead.with(field, fields.get(field));
    }
    lead
}

impl LeadReader for InMemoryStore {
    fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        *self.list_calls.lock().unwrap() += 1;
        self.take_failure()?;
        Ok(self.snapshot())
    }
}

impl LeadWriter for InMemoryStore {
    fn create_lead(&self, fields: &LeadFields) -> RepositoryResult<Option<LeadId>> {
        self.take_failure()?;
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let lead = apply(
            Lead::default()
                .with(LeadField::LeadId, id)
                .with(LeadField::DateReceived, "2024-06-01"),
            fields,
        );
        self.leads.lock().unwrap().push(lead);
        Ok(LeadId::new(id.to_string()).ok())
    }

    fn update_lead(&self, id: &LeadId, fields: &LeadFields) -> RepositoryResult<()> {
        self.take_failure()?;
        let mut leads = self.leads.lock().unwrap();
        let index = Self::position(&leads, id)?;
        let lead = std::mem::take(&mut leads[index]);
        leads[index] = apply(lead, fields);
        Ok(())
    }

    fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()> {
        self.take_failure()?;
        let mut leads = self.leads.lock().unwrap();
        let index = Self::position(&leads, id)?;
        leads.remove(index);
        Ok(())
    }
}

pub fn lead(id: i64, name: &str, stage: &str) -> Lead {
    Lead::default()
        .with(LeadField::LeadId, id)
        .with(LeadField::ClientName, name)
        .with(LeadField::Email, format!("{}@example.com", name.to_lowercase().replace(' ', ".")))
        .with(LeadField::LeadStage, stage)
        .with(LeadField::DateReceived, format!("2024-05-{id:02}"))
}

/// Two leads: Jane Doe (New) and Bob (Won).
pub fn sample_leads() -> Vec<Lead> {
    vec![lead(1, "Jane Doe", "New"), lead(2, "Bob", "Won")]
}
