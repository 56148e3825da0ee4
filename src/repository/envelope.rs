//! Wire format of the spreadsheet web service.
//!
//! Every response is `{ "success": bool, "data": ... }`. On failure `data`
//! carries a human-readable reason, usually as a bare string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::lead::{Lead, LeadFields, value_text};
use crate::domain::types::LeadId;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub const ACTION_LIST: &str = "getLeads";
pub const ACTION_ADD: &str = "add";
pub const ACTION_UPDATE: &str = "update";
pub const ACTION_DELETE: &str = "delete";

const FALLBACK_LIST_ERROR: &str = "Failed to fetch leads.";
const FALLBACK_WRITE_ERROR: &str = "The record store rejected the request.";

/// Body of an `update` request.
#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub id: &'a LeadId,
    pub data: &'a LeadFields,
}

/// Body of a `delete` request.
#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    pub id: &'a LeadId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// Reason reported by the service, or `fallback` when it gave none.
    pub fn failure_message(&self, fallback: &str) -> String {
        let reported = match &self.data {
            Value::String(message) => Some(message.as_str()),
            Value::Object(map) => ["message", "error"]
                .into_iter()
                .find_map(|key| map.get(key).and_then(Value::as_str)),
            _ => None,
        };

        reported
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Interprets a `getLeads` response.
    ///
    /// Only an explicit `success: false` is a failure; `null` data is an
    /// empty sheet.
    pub fn into_leads(self) -> RepositoryResult<Vec<Lead>> {
        if self.success == Some(false) {
            return Err(RepositoryError::Application(
                self.failure_message(FALLBACK_LIST_ERROR),
            ));
        }

        match self.data {
            Value::Null => Ok(Vec::new()),
            data @ Value::Array(_) => serde_json::from_value(data).map_err(|err| {
                RepositoryError::Application(format!("Unexpected lead list: {err}"))
            }),
            other => Err(RepositoryError::Application(format!(
                "Unexpected lead list payload: {other}"
            ))),
        }
    }

    /// Interprets a write response; anything but `success: true` fails.
    pub fn into_ack(self) -> RepositoryResult<Value> {
        if self.success == Some(true) {
            Ok(self.data)
        } else {
            Err(RepositoryError::Application(
                self.failure_message(FALLBACK_WRITE_ERROR),
            ))
        }
    }
}

/// Identifier of a freshly created lead, when the service reports one.
pub fn created_id(data: &Value) -> Option<LeadId> {
    let Value::Object(map) = data else {
        return None;
    };

    ["id", "Lead ID"]
        .into_iter()
        .filter_map(|key| map.get(key))
        .find_map(|value| LeadId::new(value_text(value)).ok())
}
