//! Payment gateway handoff for the EduText Hub storefront.
//!
//! The storefront builds a [`ChargeRequest`] from a submitted checkout and
//! awaits [`PaymentGateway::collect`]; the call resolves to a tagged
//! [`PaymentOutcome`] once the widget closes. Gateway internals stay in the
//! embedding shell.

pub mod charge;
pub mod gateway;

pub use charge::{ChargeMetadata, ChargeRequest, CustomField, CURRENCY_NGN};
pub use gateway::{InlineCheckout, MockGateway, PaymentGateway, PaymentOutcome};
