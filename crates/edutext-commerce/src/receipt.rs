//! Printable receipt assembled from a fetched order.

use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, Reference};
use crate::money::Money;

/// One purchased title on the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ReceiptLine {
    /// The line total is always recomputed from unit price and quantity
    /// rather than trusted from the wire.
    pub fn new(title: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Self {
            title: title.into(),
            quantity,
            unit_price,
            line_total: unit_price.saturating_mul(quantity),
        }
    }
}

/// What the receipt page prints for one confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub reference: Reference,
    pub order_id: OrderId,
    pub date: String,
    pub student_name: String,
    pub matric_number: String,
    pub department: String,
    pub level: String,
    pub lines: Vec<ReceiptLine>,
    /// Grand total as recorded by the backend.
    pub total: Money,
}

impl Receipt {
    /// Sum of the recomputed line totals, for cross-checking against `total`.
    pub fn lines_total(&self) -> Money {
        Money::sum(self.lines.iter().map(|line| line.line_total))
    }
}
