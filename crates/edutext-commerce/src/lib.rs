//! Core commerce domain for the EduText Hub storefront.
//!
//! This crate owns the client-side purchase logic: the cart store, the
//! checkout attempt state machine, the money arithmetic behind them and the
//! receipt projection. It is deliberately free of I/O. HTTP lives in
//! `edutext-api`, the payment gateway in `edutext-payment`, and
//! `edutext-storefront` wires the three together.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod receipt;

pub use cart::{CartLineItem, CartStore, CartTotals, SubscriberId};
pub use catalog::{Department, Textbook};
pub use checkout::{CheckoutAttempt, CheckoutDraft, CheckoutState, OrderResult, PaymentDue};
pub use error::{CheckoutError, FieldIssue, MoneyError, ValidationError};
pub use ids::{OrderId, Reference, TextbookId};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
