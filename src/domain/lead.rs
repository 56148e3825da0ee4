//! Lead records as delivered by the spreadsheet-backed record store.
//!
//! A lead is a loosely typed mapping from spreadsheet header to JSON value.
//! Numeric columns may arrive as strings, identifiers may arrive as numbers,
//! and any column may be missing. All coercion happens through the accessors
//! on [`Lead`] so that the view pipeline never inspects raw values.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::stage::Stage;
use crate::domain::types::{LeadId, TypeConstraintError};

/// Columns of the leads sheet that the dashboard understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeadField {
    #[serde(rename = "Lead ID")]
    LeadId,
    #[serde(rename = "Date Received")]
    DateReceived,
    #[serde(rename = "Client Name")]
    ClientName,
    #[serde(rename = "Phone")]
    Phone,
    #[serde(rename = "Email")]
    Email,
    #[serde(rename = "Business Type")]
    BusinessType,
    #[serde(rename = "Lead Source")]
    LeadSource,
    #[serde(rename = "Product Interested")]
    ProductInterested,
    #[serde(rename = "Lead Stage")]
    LeadStage,
    #[serde(rename = "Quoted Price")]
    QuotedPrice,
    #[serde(rename = "Next Follow-up Date")]
    NextFollowUpDate,
    #[serde(rename = "Order Value (Ksh)")]
    OrderValue,
    #[serde(rename = "Days Since Follow-up")]
    DaysSinceFollowUp,
    #[serde(rename = "Assigned To")]
    AssignedTo,
    #[serde(rename = "Notes")]
    Notes,
}

impl LeadField {
    pub const ALL: [LeadField; 15] = [
        LeadField::LeadId,
        LeadField::DateReceived,
        LeadField::ClientName,
        LeadField::Phone,
        LeadField::Email,
        LeadField::BusinessType,
        LeadField::LeadSource,
        LeadField::ProductInterested,
        LeadField::LeadStage,
        LeadField::QuotedPrice,
        LeadField::NextFollowUpDate,
        LeadField::OrderValue,
        LeadField::DaysSinceFollowUp,
        LeadField::AssignedTo,
        LeadField::Notes,
    ];

    /// Columns a user may fill in through the lead form.
    pub const EDITABLE: [LeadField; 12] = [
        LeadField::ClientName,
        LeadField::Phone,
        LeadField::Email,
        LeadField::BusinessType,
        LeadField::LeadSource,
        LeadField::ProductInterested,
        LeadField::LeadStage,
        LeadField::QuotedPrice,
        LeadField::NextFollowUpDate,
        LeadField::OrderValue,
        LeadField::AssignedTo,
        LeadField::Notes,
    ];

    /// Spreadsheet header used as the key on the wire.
    pub const fn header(self) -> &'static str {
        match self {
            LeadField::LeadId => "Lead ID",
            LeadField::DateReceived => "Date Received",
            LeadField::ClientName => "Client Name",
            LeadField::Phone => "Phone",
            LeadField::Email => "Email",
            LeadField::BusinessType => "Business Type",
            LeadField::LeadSource => "Lead Source",
            LeadField::ProductInterested => "Product Interested",
            LeadField::LeadStage => "Lead Stage",
            LeadField::QuotedPrice => "Quoted Price",
            LeadField::NextFollowUpDate => "Next Follow-up Date",
            LeadField::OrderValue => "Order Value (Ksh)",
            LeadField::DaysSinceFollowUp => "Days Since Follow-up",
            LeadField::AssignedTo => "Assigned To",
            LeadField::Notes => "Notes",
        }
    }

    /// URL-safe name used in routes.
    pub const fn slug(self) -> &'static str {
        match self {
            LeadField::LeadId => "lead-id",
            LeadField::DateReceived => "date-received",
            LeadField::ClientName => "client-name",
            LeadField::Phone => "phone",
            LeadField::Email => "email",
            LeadField::BusinessType => "business-type",
            LeadField::LeadSource => "lead-source",
            LeadField::ProductInterested => "product-interested",
            LeadField::LeadStage => "lead-stage",
            LeadField::QuotedPrice => "quoted-price",
            LeadField::NextFollowUpDate => "next-follow-up-date",
            LeadField::OrderValue => "order-value",
            LeadField::DaysSinceFollowUp => "days-since-follow-up",
            LeadField::AssignedTo => "assigned-to",
            LeadField::Notes => "notes",
        }
    }

    /// Columns sorted as numbers rather than case-insensitive text.
    pub const fn is_numeric(self) -> bool {
        matches!(self, LeadField::DaysSinceFollowUp | LeadField::OrderValue)
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.header() == header)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.slug() == slug)
    }
}

impl Display for LeadField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for LeadField {
    type Err = TypeConstraintError;

    /// Accepts either the spreadsheet header or the route slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s)
            .or_else(|| Self::from_slug(s))
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown lead field `{s}`")))
    }
}

/// A single lead row keyed by spreadsheet header.
///
/// Unknown columns are preserved untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lead(Map<String, Value>);

impl Lead {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builder-style setter used when assembling leads by hand.
    #[must_use]
    pub fn with(mut self, field: LeadField, value: impl Into<Value>) -> Self {
        self.0.insert(field.header().to_string(), value.into());
        self
    }

    /// Raw value of a recognized column.
    pub fn get(&self, field: LeadField) -> Option<&Value> {
        self.0.get(field.header())
    }

    /// Text view of a column; missing or null values are empty.
    pub fn text(&self, field: LeadField) -> String {
        self.get(field).map(value_text).unwrap_or_default()
    }

    /// Numeric view of a column; anything unparseable is zero.
    pub fn number(&self, field: LeadField) -> f64 {
        self.get(field).map(value_number).unwrap_or(0.0)
    }

    /// Identifier in string form, regardless of how the store typed it.
    pub fn id(&self) -> Option<LeadId> {
        LeadId::new(self.text(LeadField::LeadId)).ok()
    }

    /// Stage of the lead, `None` when the column is missing or blank.
    pub fn stage(&self) -> Option<Stage> {
        Stage::parse(&self.text(LeadField::LeadStage))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Lead {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Field values sent to the record store when creating or updating a lead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadFields(BTreeMap<String, String>);

impl LeadFields {
    /// Every editable column present with an empty value.
    pub fn blank() -> Self {
        LeadField::EDITABLE
            .into_iter()
            .map(|field| (field, String::new()))
            .collect()
    }

    /// Pre-fills the editable columns from an existing lead.
    pub fn from_lead(lead: &Lead) -> Self {
        LeadField::EDITABLE
            .into_iter()
            .map(|field| (field, lead.text(field)))
            .collect()
    }

    pub fn get(&self, field: LeadField) -> &str {
        self.0.get(field.header()).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        self.0.insert(field.header().to_string(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(LeadField, String)> for LeadFields {
    fn from_iter<I: IntoIterator<Item = (LeadField, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.header().to_string(), value))
                .collect(),
        )
    }
}

/// Renders a JSON value the way the sheet shows it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // Sheets hands back whole numbers as floats; print them without `.0`.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Coerces a JSON value to a number, falling back to zero.
pub fn value_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Parses the longest decimal prefix of `raw`, ignoring leading whitespace.
///
/// `"100abc"` yields 100, `"abc"` yields `None`.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            mantissa_digits += frac_end - end - 1;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
