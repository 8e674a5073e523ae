//! Shopping cart state and derived totals.

mod store;
mod totals;

pub use store::{CartLineItem, CartStore, SubscriberId};
pub use totals::CartTotals;
