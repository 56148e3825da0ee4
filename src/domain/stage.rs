//! Pipeline stage of a lead.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Categorical status of a lead. Free-text stages are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    New,
    Qualified,
    OfferSent,
    Won,
    Lost,
    Other(String),
}

impl Stage {
    /// Stages offered in the filter dropdown and the lead form.
    pub const KNOWN: [&'static str; 5] = ["New", "Qualified", "Offer Sent", "Won", "Lost"];

    /// Parses a stage label. Blank labels have no stage.
    pub fn parse(label: &str) -> Option<Self> {
        let stage = match label {
            "" => return None,
            "New" => Stage::New,
            "Qualified" => Stage::Qualified,
            "Offer Sent" => Stage::OfferSent,
            "Won" => Stage::Won,
            "Lost" => Stage::Lost,
            other => Stage::Other(other.to_string()),
        };
        Some(stage)
    }

    pub fn label(&self) -> &str {
        match self {
            Stage::New => "New",
            Stage::Qualified => "Qualified",
            Stage::OfferSent => "Offer Sent",
            Stage::Won => "Won",
            Stage::Lost => "Lost",
            Stage::Other(label) => label,
        }
    }

    /// CSS modifier for the stage badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Stage::New => "badge-new",
            Stage::Qualified => "badge-qualified",
            Stage::OfferSent => "badge-offer",
            Stage::Won => "badge-won",
            Stage::Lost => "badge-lost",
            Stage::Other(_) => "badge-other",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
