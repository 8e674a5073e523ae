//! Error types for the storefront domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure while parsing or scaling a Naira amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid naira amount {0:?}")]
    Parse(String),
    #[error("naira amount {0:?} out of range")]
    Overflow(String),
}

/// A single checkout form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejected checkout input. Carries one issue per offending field so the
/// form can annotate each of them in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, message)],
        }
    }

    /// The rejection raised when checkout is attempted with nothing in the cart.
    pub fn empty_cart() -> Self {
        Self::single("cart", "cart is empty")
    }

    pub fn summary(&self) -> String {
        let fields: Vec<&str> = self.issues.iter().map(|i| i.field.as_str()).collect();
        fields.join(", ")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.summary())
    }
}

impl std::error::Error for ValidationError {}

/// Misuse of the checkout state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid checkout transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
