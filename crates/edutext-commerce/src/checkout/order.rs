//! The sealed outcome of a paid checkout.

use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::checkout::CheckoutDraft;
use crate::ids::Reference;
use crate::money::Money;

/// Everything order submission needs, captured at the moment the gateway
/// confirmed payment. Fields are private so the payload cannot be edited
/// between confirmation and submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    reference: Reference,
    buyer: CheckoutDraft,
    lines: Vec<CartLineItem>,
    amount: Money,
    transaction: String,
}

impl OrderResult {
    pub(crate) fn new(
        reference: Reference,
        buyer: CheckoutDraft,
        lines: Vec<CartLineItem>,
        amount: Money,
        transaction: String,
    ) -> Self {
        Self {
            reference,
            buyer,
            lines,
            amount,
            transaction,
        }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn buyer(&self) -> &CheckoutDraft {
        &self.buyer
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Gateway transaction id reported with the successful charge.
    pub fn transaction(&self) -> &str {
        &self.transaction
    }
}
