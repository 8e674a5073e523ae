//! What the gateway is asked to collect.

use serde::{Deserialize, Serialize};

use edutext_commerce::{Money, Reference};

/// Currency code for every storefront charge.
pub const CURRENCY_NGN: &str = "NGN";

/// One metadata entry shown on the gateway dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

impl CustomField {
    pub fn new(
        display_name: impl Into<String>,
        variable_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            variable_name: variable_name.into(),
            value: value.into(),
        }
    }
}

/// Free-form metadata attached to a charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeMetadata {
    pub custom_fields: Vec<CustomField>,
}

impl ChargeMetadata {
    /// The entries the storefront attaches so support staff can match a
    /// charge to a student without opening the backend.
    pub fn for_student(name: impl Into<String>, matric_number: impl Into<String>) -> Self {
        Self {
            custom_fields: vec![
                CustomField::new("Customer Name", "customer_name", name),
                CustomField::new("Matric Number", "matric_number", matric_number),
            ],
        }
    }
}

/// A single charge for the gateway to collect.
///
/// `amount` is the exact cart subtotal in kobo; the gateway works in minor
/// units, so no further scaling happens past this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub reference: Reference,
    pub email: String,
    pub amount: Money,
    pub currency: String,
    pub metadata: ChargeMetadata,
}

impl ChargeRequest {
    pub fn new(reference: Reference, email: impl Into<String>, amount: Money) -> Self {
        Self {
            reference,
            email: email.into(),
            amount,
            currency: CURRENCY_NGN.to_string(),
            metadata: ChargeMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ChargeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The amount in gateway minor units (kobo).
    pub fn amount_minor_units(&self) -> i64 {
        self.amount.kobo()
    }
}
