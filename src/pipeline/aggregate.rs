//! Summary metrics over the filtered leads.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::lead::{Lead, LeadField};
use crate::domain::stage::Stage;

/// Bucket for leads without a stage.
pub const UNKNOWN_STAGE: &str = "Unknown";

/// Share of the quoted price counted for leads with an open offer.
pub const OFFER_SENT_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadMetrics {
    pub total: usize,
    pub per_stage: BTreeMap<String, usize>,
    pub revenue_projection: f64,
}

impl LeadMetrics {
    pub fn stage_count(&self, stage: &str) -> usize {
        self.per_stage.get(stage).copied().unwrap_or(0)
    }
}

/// Expected revenue contributed by a single lead.
///
/// Open offers count half their quoted price. Won leads count their order
/// value, or the quoted price when no usable order value was recorded.
pub fn projected_revenue(lead: &Lead) -> f64 {
    let quoted = lead.number(LeadField::QuotedPrice);
    match lead.stage() {
        Some(Stage::OfferSent) => quoted * OFFER_SENT_WEIGHT,
        Some(Stage::Won) => {
            let order_value = lead.number(LeadField::OrderValue);
            if order_value != 0.0 { order_value } else { quoted }
        }
        _ => 0.0,
    }
}

pub fn aggregate(leads: &[&Lead]) -> LeadMetrics {
    let mut metrics = LeadMetrics {
        total: leads.len(),
        ..LeadMetrics::default()
    };

    for lead in leads {
        let stage = lead
            .stage()
            .map(|stage| stage.label().to_string())
            .unwrap_or_else(|| UNKNOWN_STAGE.to_string());
        *metrics.per_stage.entry(stage).or_default() += 1;
        metrics.revenue_projection += projected_revenue(lead);
    }

    metrics
}
