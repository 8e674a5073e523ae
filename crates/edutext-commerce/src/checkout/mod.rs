//! Checkout flow: buyer details, the payment state machine and its outcome.

mod attempt;
mod draft;
mod order;

pub use attempt::{CheckoutAttempt, CheckoutState, PaymentDue};
pub use draft::CheckoutDraft;
pub use order::OrderResult;
