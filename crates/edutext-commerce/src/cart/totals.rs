//! Cart summary figures shown on the cart page.

use serde::{Deserialize, Serialize};

use crate::cart::CartStore;
use crate::money::Money;

/// Estimated VAT rate shown in the cart summary, in percent.
pub const ESTIMATED_VAT_PERCENT: i64 = 5;

/// Breakdown displayed in the cart summary panel.
///
/// The VAT line is an estimate for display only. Checkout charges the plain
/// subtotal, and the backend invoices tax on its side if it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub estimated_vat: Money,
    pub total_with_vat: Money,
}

impl CartTotals {
    pub fn from_subtotal(subtotal: Money) -> Self {
        let estimated_vat = vat_on(subtotal);
        Self {
            subtotal,
            estimated_vat,
            total_with_vat: subtotal.saturating_add(estimated_vat),
        }
    }

    pub fn of(cart: &CartStore) -> Self {
        Self::from_subtotal(cart.subtotal())
    }
}

fn vat_on(subtotal: Money) -> Money {
    let scaled = subtotal.kobo().saturating_mul(ESTIMATED_VAT_PERCENT);
    // Half-kobo amounts round up, matching how parsed prices round.
    Money::from_kobo(scaled.saturating_add(50) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Textbook;

    #[test]
    fn test_vat_is_five_percent_of_subtotal() {
        let totals = CartTotals::from_subtotal(Money::from_kobo(600000));
        assert_eq!(totals.estimated_vat, Money::from_kobo(30000));
        assert_eq!(totals.total_with_vat, Money::from_kobo(630000));
    }

    #[test]
    fn test_vat_rounds_half_kobo_up() {
        // 499990 kobo * 5% = 24999.5 kobo
        let totals = CartTotals::from_subtotal(Money::from_kobo(499990));
        assert_eq!(totals.estimated_vat, Money::from_kobo(25000));
    }

    #[test]
    fn test_totals_read_from_cart() {
        let mut cart = CartStore::new();
        cart.add_item(&Textbook::new(1, "Technical Drawing", Money::from_kobo(100000)));
        let totals = CartTotals::of(&cart);
        assert_eq!(totals.subtotal, Money::from_kobo(100000));
        assert_eq!(totals.estimated_vat, Money::from_kobo(5000));
    }
}
