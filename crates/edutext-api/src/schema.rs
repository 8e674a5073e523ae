//! Tolerant wire types and body helpers shared by the API clients.

use serde::{Deserialize, Serialize};

use edutext_commerce::Money;

use crate::error::SchemaError;

/// An amount field as the backend actually sends it.
///
/// The API serializes decimals as strings (`"5999.00"`) but has been seen
/// emitting bare numbers from older endpoints. Both forms funnel through the
/// exact decimal parser; float arithmetic is never involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl RawAmount {
    /// Parses the amount into kobo, naming `field` in any rejection.
    pub fn to_money(&self, field: &str) -> Result<Money, SchemaError> {
        let text = match self {
            RawAmount::Text(text) => text.clone(),
            // serde_json renders the shortest decimal form of the number,
            // which the exact parser then scales to kobo.
            RawAmount::Number(number) => number.to_string(),
        };
        Money::parse_naira(&text).map_err(|error| SchemaError::new(field, error.to_string()))
    }
}

const MAX_RAW_MESSAGE_LEN: usize = 200;

/// Pulls a human-readable message out of a backend error body.
///
/// The backend (a DRF service) puts messages under `detail`, `message` or
/// `error` depending on the view. Anything else falls back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no error detail provided".to_string();
    }
    match trimmed.char_indices().nth(MAX_RAW_MESSAGE_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
