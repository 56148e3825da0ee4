//! Search and stage filtering.

use crate::domain::lead::{Lead, LeadField};

/// Columns the free-text search looks at.
const SEARCH_FIELDS: [LeadField; 3] = [LeadField::ClientName, LeadField::Email, LeadField::Phone];

/// Case-insensitive substring match on name, email or phone.
///
/// `needle` must already be lower-cased. An empty needle matches everything.
pub fn matches_search(lead: &Lead, needle: &str) -> bool {
    needle.is_empty()
        || SEARCH_FIELDS
            .into_iter()
            .any(|field| lead.text(field).to_lowercase().contains(needle))
}

/// Exact stage match. An empty filter matches everything.
pub fn matches_stage(lead: &Lead, stage: &str) -> bool {
    stage.is_empty() || lead.text(LeadField::LeadStage) == stage
}

/// Leads passing both the search term and the stage filter, in input order.
pub fn filter_leads<'a>(leads: &'a [Lead], search: &str, stage: &str) -> Vec<&'a Lead> {
    let needle = search.to_lowercase();
    leads
        .iter()
        .filter(|lead| matches_search(lead, &needle) && matches_stage(lead, stage))
        .collect()
}
