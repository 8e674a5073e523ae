//! Checkout attempt state machine.

use std::fmt;
use std::mem;

use tracing::debug;

use crate::cart::{CartLineItem, CartStore};
use crate::checkout::{CheckoutDraft, OrderResult};
use crate::error::{CheckoutError, ValidationError};
use crate::ids::Reference;
use crate::money::Money;

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting buyer details; the form is editable.
    Draft,
    /// Submitted; the payment gateway holds the floor.
    AwaitingPayment,
    /// Payment confirmed; the attempt is finished.
    Confirmed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Draft => "draft",
            CheckoutState::AwaitingPayment => "awaiting_payment",
            CheckoutState::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the payment gateway must collect for a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDue {
    pub reference: Reference,
    pub email: String,
    pub amount: Money,
}

enum Phase {
    Draft,
    AwaitingPayment {
        amount: Money,
        snapshot: Vec<CartLineItem>,
    },
    Confirmed,
}

impl Phase {
    fn state(&self) -> CheckoutState {
        match self {
            Phase::Draft => CheckoutState::Draft,
            Phase::AwaitingPayment { .. } => CheckoutState::AwaitingPayment,
            Phase::Confirmed => CheckoutState::Confirmed,
        }
    }
}

/// One purchase attempt from form entry to confirmed payment.
///
/// The reference is minted when the attempt is created and never changes,
/// however many times payment is retried. Submitting freezes the cart lines
/// and the payable amount; a cancelled payment rolls back to `Draft` with
/// the buyer details and reference intact, so a retry reuses both.
pub struct CheckoutAttempt {
    reference: Reference,
    buyer: CheckoutDraft,
    phase: Phase,
}

impl CheckoutAttempt {
    pub fn new() -> Self {
        Self::with_reference(Reference::generate())
    }

    pub fn with_reference(reference: Reference) -> Self {
        Self {
            reference,
            buyer: CheckoutDraft::default(),
            phase: Phase::Draft,
        }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn state(&self) -> CheckoutState {
        self.phase.state()
    }

    pub fn buyer(&self) -> &CheckoutDraft {
        &self.buyer
    }

    /// The frozen payable amount, present only while awaiting payment.
    pub fn amount(&self) -> Option<Money> {
        match &self.phase {
            Phase::AwaitingPayment { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    /// The cart lines frozen at submission, empty outside `AwaitingPayment`.
    pub fn line_items(&self) -> &[CartLineItem] {
        match &self.phase {
            Phase::AwaitingPayment { snapshot, .. } => snapshot,
            _ => &[],
        }
    }

    /// Validates the draft against the cart and moves to `AwaitingPayment`.
    ///
    /// The returned [`PaymentDue`] carries the exact kobo amount the gateway
    /// must charge: the cart subtotal at this instant, no more and no less.
    pub fn submit(
        &mut self,
        draft: CheckoutDraft,
        cart: &CartStore,
    ) -> Result<PaymentDue, CheckoutError> {
        if !matches!(self.phase, Phase::Draft) {
            return Err(self.transition_error(CheckoutState::AwaitingPayment));
        }
        draft.validate()?;
        if cart.is_empty() {
            return Err(ValidationError::empty_cart().into());
        }

        let amount = cart.subtotal();
        let snapshot = cart.snapshot();
        self.buyer = draft;
        self.phase = Phase::AwaitingPayment { amount, snapshot };
        debug!(reference = %self.reference, amount_kobo = amount.kobo(), "checkout submitted");

        Ok(PaymentDue {
            reference: self.reference.clone(),
            email: self.buyer.email.clone(),
            amount,
        })
    }

    /// Records that the buyer dismissed the payment widget. Not an error:
    /// the attempt returns to `Draft` and keeps its reference for the retry.
    pub fn payment_cancelled(&mut self) -> Result<(), CheckoutError> {
        match self.phase {
            Phase::AwaitingPayment { .. } => {
                self.phase = Phase::Draft;
                debug!(reference = %self.reference, "payment cancelled, back to draft");
                Ok(())
            }
            _ => Err(self.transition_error(CheckoutState::Draft)),
        }
    }

    /// Records a successful charge and seals the attempt.
    ///
    /// Consumes the frozen snapshot into an [`OrderResult`], which is the
    /// only input order submission accepts. Calling this twice fails, which
    /// is what keeps one payment from ever producing two orders.
    pub fn payment_succeeded(
        &mut self,
        transaction: impl Into<String>,
    ) -> Result<OrderResult, CheckoutError> {
        match mem::replace(&mut self.phase, Phase::Confirmed) {
            Phase::AwaitingPayment { amount, snapshot } => {
                debug!(reference = %self.reference, "payment confirmed");
                Ok(OrderResult::new(
                    self.reference.clone(),
                    self.buyer.clone(),
                    snapshot,
                    amount,
                    transaction.into(),
                ))
            }
            other => {
                let from = other.state().as_str();
                self.phase = other;
                Err(CheckoutError::InvalidTransition {
                    from,
                    to: CheckoutState::Confirmed.as_str(),
                })
            }
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.phase, Phase::Confirmed)
    }

    fn transition_error(&self, to: CheckoutState) -> CheckoutError {
        CheckoutError::InvalidTransition {
            from: self.state().as_str(),
            to: to.as_str(),
        }
    }
}

impl Default for CheckoutAttempt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Textbook;
    use crate::ids::TextbookId;

    fn stocked_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(&Textbook::new(1, "Technical Drawing", Money::from_kobo(350000)));
        cart.add_item(&Textbook::new(2, "Workshop Practice", Money::from_kobo(200000)));
        cart
    }

    fn draft() -> CheckoutDraft {
        CheckoutDraft {
            student_name: "Adaeze Okafor".to_string(),
            email: "adaeze.okafor@student.yabatech.edu.ng".to_string(),
            phone: "08031234567".to_string(),
            matric_number: "F/ND/23/3210041".to_string(),
            department: "Computer Science".to_string(),
            level: "ND2".to_string(),
            program_type: "Full-Time".to_string(),
        }
    }

    #[test]
    fn test_new_attempt_starts_in_draft() {
        let attempt = CheckoutAttempt::new();
        assert_eq!(attempt.state(), CheckoutState::Draft);
        assert!(attempt.amount().is_none());
        assert!(attempt.line_items().is_empty());
    }

    #[test]
    fn test_submit_freezes_amount_and_lines() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::with_reference(Reference::new("R1"));

        let due = attempt.submit(draft(), &cart).unwrap();

        assert_eq!(due.reference.as_str(), "R1");
        assert_eq!(due.email, "adaeze.okafor@student.yabatech.edu.ng");
        assert_eq!(due.amount, Money::from_kobo(550000));
        assert_eq!(attempt.state(), CheckoutState::AwaitingPayment);
        assert_eq!(attempt.amount(), Some(Money::from_kobo(550000)));
        assert_eq!(attempt.line_items().len(), 2);
    }

    #[test]
    fn test_snapshot_survives_later_cart_edits() {
        let mut cart = stocked_cart();
        let mut attempt = CheckoutAttempt::new();
        attempt.submit(draft(), &cart).unwrap();

        cart.clear();

        assert_eq!(attempt.line_items().len(), 2);
        assert_eq!(attempt.amount(), Some(Money::from_kobo(550000)));
    }

    #[test]
    fn test_submit_rejects_empty_cart() {
        let cart = CartStore::new();
        let mut attempt = CheckoutAttempt::new();
        let error = attempt.submit(draft(), &cart).unwrap_err();
        match error {
            CheckoutError::Validation(v) => assert_eq!(v.issues[0].field, "cart"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(attempt.state(), CheckoutState::Draft);
    }

    #[test]
    fn test_submit_rejects_invalid_draft() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::new();
        let bad = CheckoutDraft {
            email: String::new(),
            ..draft()
        };
        assert!(matches!(
            attempt.submit(bad, &cart),
            Err(CheckoutError::Validation(_))
        ));
        assert_eq!(attempt.state(), CheckoutState::Draft);
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::new();
        attempt.submit(draft(), &cart).unwrap();
        assert!(matches!(
            attempt.submit(draft(), &cart),
            Err(CheckoutError::InvalidTransition {
                from: "awaiting_payment",
                ..
            })
        ));
    }

    #[test]
    fn test_cancel_returns_to_draft_with_same_reference() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::with_reference(Reference::new("R1"));
        attempt.submit(draft(), &cart).unwrap();

        attempt.payment_cancelled().unwrap();

        assert_eq!(attempt.state(), CheckoutState::Draft);
        assert_eq!(attempt.reference().as_str(), "R1");
        assert_eq!(attempt.buyer().student_name, "Adaeze Okafor");
        assert!(attempt.amount().is_none());
    }

    #[test]
    fn test_retry_after_cancel_reuses_reference() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::with_reference(Reference::new("R1"));

        let first = attempt.submit(draft(), &cart).unwrap();
        attempt.payment_cancelled().unwrap();
        let second = attempt.submit(draft(), &cart).unwrap();

        assert_eq!(first.reference, second.reference);
        assert_eq!(second.reference.as_str(), "R1");
    }

    #[test]
    fn test_success_produces_sealed_order_result() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::with_reference(Reference::new("R1"));
        attempt.submit(draft(), &cart).unwrap();

        let order = attempt.payment_succeeded("TXN-991").unwrap();

        assert!(attempt.is_confirmed());
        assert_eq!(order.reference().as_str(), "R1");
        assert_eq!(order.amount(), Money::from_kobo(550000));
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.lines()[0].id, TextbookId::new(1));
        assert_eq!(order.transaction(), "TXN-991");
        assert_eq!(order.buyer().matric_number, "F/ND/23/3210041");
    }

    #[test]
    fn test_success_twice_is_rejected() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::new();
        attempt.submit(draft(), &cart).unwrap();
        attempt.payment_succeeded("TXN-991").unwrap();

        assert!(matches!(
            attempt.payment_succeeded("TXN-992"),
            Err(CheckoutError::InvalidTransition {
                from: "confirmed",
                to: "confirmed",
            })
        ));
    }

    #[test]
    fn test_terminal_transitions_from_draft_are_rejected() {
        let mut attempt = CheckoutAttempt::new();
        assert!(matches!(
            attempt.payment_cancelled(),
            Err(CheckoutError::InvalidTransition { from: "draft", .. })
        ));
        assert!(matches!(
            attempt.payment_succeeded("TXN-1"),
            Err(CheckoutError::InvalidTransition { from: "draft", .. })
        ));
    }

    #[test]
    fn test_confirmed_attempt_rejects_resubmission() {
        let cart = stocked_cart();
        let mut attempt = CheckoutAttempt::new();
        attempt.submit(draft(), &cart).unwrap();
        attempt.payment_succeeded("TXN-991").unwrap();

        assert!(matches!(
            attempt.submit(draft(), &cart),
            Err(CheckoutError::InvalidTransition {
                from: "confirmed",
                ..
            })
        ));
    }
}
