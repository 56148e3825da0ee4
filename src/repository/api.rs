//! Record store client backed by the spreadsheet web service.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::domain::lead::{Lead, LeadFields};
use crate::domain::types::LeadId;
use crate::repository::envelope::{
    ACTION_ADD, ACTION_DELETE, ACTION_LIST, ACTION_UPDATE, ApiEnvelope, DeleteRequest,
    UpdateRequest, created_id,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{LeadReader, LeadWriter};

/// Blocking JSON-over-HTTP client. One request per call, no retries.
#[derive(Clone, Debug)]
pub struct ApiLeadRepository {
    client: Client,
    endpoint: String,
}

impl ApiLeadRepository {
    pub fn new(endpoint: impl Into<String>) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| RepositoryError::Transport(format!("Failed to build client: {err}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get(&self, action: &str) -> RepositoryResult<ApiEnvelope> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("action", action)])
            .header(CONTENT_TYPE, "application/json");
        self.send(action, request)
    }

    fn post<B: Serialize + ?Sized>(&self, action: &str, body: &B) -> RepositoryResult<ApiEnvelope> {
        let request = self
            .client
            .post(&self.endpoint)
            .query(&[("action", action)])
            .json(body);
        self.send(action, request)
    }

    fn send(&self, action: &str, request: RequestBuilder) -> RepositoryResult<ApiEnvelope> {
        let response = request.send().map_err(|err| {
            log::error!("API call `{action}` failed: {err}");
            RepositoryError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("API call `{action}` returned {status}");
            return Err(RepositoryError::Transport(format!(
                "HTTP error, status: {status}"
            )));
        }

        response.json::<ApiEnvelope>().map_err(|err| {
            log::error!("API call `{action}` returned an unreadable body: {err}");
            RepositoryError::Transport(format!("Invalid response body: {err}"))
        })
    }
}

impl LeadReader for ApiLeadRepository {
    fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        self.get(ACTION_LIST)?.into_leads()
    }
}

impl LeadWriter for ApiLeadRepository {
    fn create_lead(&self, fields: &LeadFields) -> RepositoryResult<Option<LeadId>> {
        let data = self.post(ACTION_ADD, fields)?.into_ack()?;
        Ok(created_id(&data))
    }

    fn update_lead(&self, id: &LeadId, fields: &LeadFields) -> RepositoryResult<()> {
        let body = UpdateRequest { id, data: fields };
        self.post(ACTION_UPDATE, &body)?.into_ack()?;
        Ok(())
    }

    fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()> {
        self.post(ACTION_DELETE, &DeleteRequest { id })?.into_ack()?;
        Ok(())
    }
}
