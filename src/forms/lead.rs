use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::lead::{LeadField, LeadFields};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Add/edit form of the lead modal. Field names are the sheet headers.
pub struct LeadForm {
    #[serde(rename = "Client Name", default)]
    #[validate(length(min = 1))]
    pub client_name: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Email", default)]
    #[validate(custom(function = "validate_optional_email"))]
    pub email: String,
    #[serde(rename = "Business Type", default)]
    pub business_type: String,
    #[serde(rename = "Lead Source", default)]
    pub lead_source: String,
    #[serde(rename = "Product Interested", default)]
    pub product_interested: String,
    #[serde(rename = "Lead Stage", default)]
    pub lead_stage: String,
    #[serde(rename = "Quoted Price", default)]
    #[validate(custom(function = "validate_optional_number"))]
    pub quoted_price: String,
    #[serde(rename = "Next Follow-up Date", default)]
    pub next_follow_up_date: String,
    #[serde(rename = "Order Value (Ksh)", default)]
    #[validate(custom(function = "validate_optional_number"))]
    pub order_value: String,
    #[serde(rename = "Assigned To", default)]
    pub assigned_to: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}

/// Identifies the lead a row or modal button acts on.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LeadIdForm {
    #[serde(default)]
    pub id: String,
}

fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn validate_optional_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<f64>().is_ok_and(f64::is_finite) {
        Ok(())
    } else {
        Err(ValidationError::new("number"))
    }
}

impl LeadForm {
    /// Runs the form checks and yields the field mapping sent to the store.
    pub fn into_fields(self) -> Result<LeadFields, FormError> {
        if self.client_name.trim().is_empty() {
            return Err(FormError::MissingClientName);
        }
        self.validate().map_err(FormError::from_validation)?;
        Ok(LeadFields::from(&self))
    }
}

impl From<&LeadForm> for LeadFields {
    /// Trimmed values keyed by sheet header, every editable column present.
    fn from(form: &LeadForm) -> Self {
        [
            (LeadField::ClientName, &form.client_name),
            (LeadField::Phone, &form.phone),
            (LeadField::Email, &form.email),
            (LeadField::BusinessType, &form.business_type),
            (LeadField::LeadSource, &form.lead_source),
            (LeadField::ProductInterested, &form.product_interested),
            (LeadField::LeadStage, &form.lead_stage),
            (LeadField::QuotedPrice, &form.quoted_price),
            (LeadField::NextFollowUpDate, &form.next_follow_up_date),
            (LeadField::OrderValue, &form.order_value),
            (LeadField::AssignedTo, &form.assigned_to),
            (LeadField::Notes, &form.notes),
        ]
        .into_iter()
        .map(|(field, value)| (field, value.trim().to_string()))
        .collect()
    }
}
