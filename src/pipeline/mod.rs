//! Filter, sort, paginate and aggregate: the transformation from the full
//! lead list to what the dashboard shows.
//!
//! Everything here is a pure function of its inputs.

use crate::domain::lead::Lead;
use crate::domain::view::ViewState;
use crate::pagination::Paginated;

pub mod aggregate;
pub mod filter;
pub mod sort;

pub use aggregate::LeadMetrics;

/// Result of running the pipeline for one view state.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<'a> {
    /// Current page of the filtered, sorted leads.
    pub page: Paginated<&'a Lead>,
    /// Metrics over every filtered lead, not just the current page.
    pub metrics: LeadMetrics,
}

pub fn run<'a>(leads: &'a [Lead], view: &ViewState) -> PipelineOutput<'a> {
    let mut visible = filter::filter_leads(leads, &view.search, &view.stage_filter);
    sort::sort_leads(&mut visible, view.sort_column, view.sort_direction);

    let metrics = aggregate::aggregate(&visible);
    let page = Paginated::paginate(&visible, view.page, view.per_page);

    PipelineOutput { page, metrics }
}
