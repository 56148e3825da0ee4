use serde::Serialize;

use crate::domain::lead::{Lead, LeadField};
use crate::domain::stage::Stage;
use crate::domain::view::{SortDirection, ViewState};
use crate::pipeline::PipelineOutput;
use crate::services::dashboard::ModalSession;

/// Columns the table header lets the user sort by.
pub const SORTABLE_COLUMNS: [LeadField; 6] = [
    LeadField::ClientName,
    LeadField::LeadStage,
    LeadField::DateReceived,
    LeadField::NextFollowUpDate,
    LeadField::DaysSinceFollowUp,
    LeadField::OrderValue,
];

/// Days without follow-up from which a row is flagged.
pub const OVERDUE_DAYS: f64 = 7.0;
pub const WARNING_DAYS: f64 = 3.0;

/// Data required to render the dashboard template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPageData {
    pub metrics: Vec<MetricCard>,
    pub rows: Vec<LeadRow>,
    pub pagination: PaginationView,
    pub sort_headers: Vec<SortHeader>,
    pub search: String,
    pub stage_filter: String,
    /// Stage options for the filter dropdown and the form.
    pub stages: Vec<&'static str>,
    pub modal: Option<ModalView>,
    pub delete_confirmation: Option<DeleteConfirmation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub color: &'static str,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRow {
    pub id: String,
    pub client_name: String,
    pub email: String,
    pub stage: String,
    pub badge_class: &'static str,
    pub date_received: String,
    pub next_follow_up: String,
    pub days_since_follow_up: String,
    pub urgency_class: &'static str,
    pub order_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortHeader {
    pub label: &'static str,
    pub slug: &'static str,
    /// Direction when this column is the active sort.
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: String,
    /// Present when editing an existing lead.
    pub lead_id: Option<String>,
    pub fields: Vec<FormFieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFieldView {
    pub name: &'static str,
    pub value: String,
    pub input: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteConfirmation {
    pub lead_id: String,
    pub client_name: String,
}

impl DashboardPageData {
    pub fn new(
        output: &PipelineOutput<'_>,
        view: &ViewState,
        modal: Option<&ModalSession>,
        pending_delete: Option<&Lead>,
    ) -> Self {
        let metrics = &output.metrics;
        let page = &output.page;

        Self {
            metrics: vec![
                MetricCard {
                    title: "Total Active Leads",
                    value: metrics.total.to_string(),
                    color: "blue",
                },
                MetricCard {
                    title: "Leads at Offer Stage",
                    value: metrics.stage_count(Stage::OfferSent.label()).to_string(),
                    color: "indigo",
                },
                MetricCard {
                    title: "Revenue Projection (Ksh)",
                    value: format_ksh(metrics.revenue_projection),
                    color: "green",
                },
                MetricCard {
                    title: "Leads Lost",
                    value: metrics.stage_count(Stage::Lost.label()).to_string(),
                    color: "red",
                },
            ],
            rows: page.items.iter().map(|lead| LeadRow::from(*lead)).collect(),
            pagination: PaginationView {
                page: page.page,
                total_pages: page.total_pages,
                total: page.total,
                previous: page.has_previous().then(|| page.page - 1),
                next: page.has_next().then(|| page.page + 1),
            },
            sort_headers: SORTABLE_COLUMNS
                .iter()
                .map(|&column| SortHeader {
                    label: column.header(),
                    slug: column.slug(),
                    direction: (view.sort_column == column).then_some(view.sort_direction),
                })
                .collect(),
            search: view.search.clone(),
            stage_filter: view.stage_filter.clone(),
            stages: Stage::KNOWN.to_vec(),
            modal: modal.map(ModalView::from),
            delete_confirmation: pending_delete.map(|lead| DeleteConfirmation {
                lead_id: lead.id().map(|id| id.into_inner()).unwrap_or_default(),
                client_name: lead.text(LeadField::ClientName),
            }),
        }
    }
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        let stage = lead.stage();
        let days = lead.text(LeadField::DaysSinceFollowUp);
        let next_follow_up = lead.text(LeadField::NextFollowUpDate);

        Self {
            id: lead.id().map(|id| id.into_inner()).unwrap_or_default(),
            client_name: lead.text(LeadField::ClientName),
            email: lead.text(LeadField::Email),
            stage: stage.as_ref().map(|s| s.label().to_string()).unwrap_or_default(),
            badge_class: stage.as_ref().map_or("badge-other", Stage::badge_class),
            date_received: lead.text(LeadField::DateReceived),
            next_follow_up: if next_follow_up.is_empty() {
                "N/A".to_string()
            } else {
                next_follow_up
            },
            days_since_follow_up: if days.is_empty() { "0".to_string() } else { days },
            urgency_class: urgency_class(lead.number(LeadField::DaysSinceFollowUp)),
            order_value: lead.text(LeadField::OrderValue),
        }
    }
}

impl From<&ModalSession> for ModalView {
    fn from(session: &ModalSession) -> Self {
        let title = match &session.target {
            None => "Add New Lead".to_string(),
            Some(_) => format!(
                "Edit Lead: {}",
                session.fields.get(LeadField::ClientName)
            ),
        };

        Self {
            title,
            lead_id: session.target.as_ref().map(|id| id.to_string()),
            fields: LeadField::EDITABLE
                .iter()
                .map(|&field| FormFieldView {
                    name: field.header(),
                    value: session.fields.get(field).to_string(),
                    input: input_kind(field),
                    required: field == LeadField::ClientName,
                })
                .collect(),
        }
    }
}

fn input_kind(field: LeadField) -> &'static str {
    match field {
        LeadField::Email => "email",
        LeadField::Phone => "tel",
        LeadField::QuotedPrice | LeadField::OrderValue => "number",
        LeadField::NextFollowUpDate => "date",
        LeadField::LeadStage => "select",
        LeadField::Notes => "textarea",
        _ => "text",
    }
}

pub fn urgency_class(days: f64) -> &'static str {
    if days >= OVERDUE_DAYS {
        "urgency-overdue"
    } else if days >= WARNING_DAYS {
        "urgency-warning"
    } else {
        "urgency-ok"
    }
}

/// Formats an amount as whole shillings with thousands separators,
/// rounding half away from zero: `Ksh 1,234,567`.
pub fn format_ksh(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("Ksh {sign}{grouped}")
}
