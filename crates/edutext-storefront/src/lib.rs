//! Session orchestration for the EduText Hub storefront.
//!
//! A [`Storefront`] wires the cart and checkout state machine from
//! `edutext-commerce` to the backend clients in `edutext-api` and a
//! [`edutext_payment::PaymentGateway`] implementation supplied by the
//! embedding shell. One instance serves one buyer session.

pub mod config;
pub mod receipts;
pub mod session;

pub use config::StorefrontConfig;
pub use session::{CheckoutOutcome, Storefront, StorefrontError, UnreconciledPayment};
