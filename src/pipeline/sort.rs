//! Column sorting.
//!
//! The sort is stable: leads with equal keys keep the order the record store
//! returned them in, in both directions.

use std::cmp::Ordering;

use crate::domain::lead::{Lead, LeadField};
use crate::domain::view::SortDirection;

/// Compares two leads on `column` in ascending order.
pub fn compare_leads(a: &Lead, b: &Lead, column: LeadField) -> Ordering {
    if column.is_numeric() {
        a.number(column)
            .partial_cmp(&b.number(column))
            .unwrap_or(Ordering::Equal)
    } else {
        a.text(column)
            .to_lowercase()
            .cmp(&b.text(column).to_lowercase())
    }
}

pub fn sort_leads(leads: &mut [&Lead], column: LeadField, direction: SortDirection) {
    match direction {
        SortDirection::Asc => leads.sort_by(|a, b| compare_leads(a, b, column)),
        SortDirection::Desc => leads.sort_by(|a, b| compare_leads(b, a, column)),
    }
}
