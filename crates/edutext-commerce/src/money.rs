//! Naira amounts stored as integer kobo.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MoneyError;

const KOBO_PER_NAIRA: i64 = 100;

/// A Naira amount held as a whole number of kobo.
///
/// Prices arrive from the catalog API as decimal strings. Parsing them into
/// kobo at the boundary keeps every later sum and comparison exact, so the
/// amount handed to the payment gateway never drifts from the cart subtotal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_kobo(kobo: i64) -> Self {
        Money(kobo)
    }

    /// Parses a decimal Naira string such as `"5999.00"` into kobo.
    ///
    /// Accepts an optional sign, an integer part and up to any number of
    /// fraction digits. Fractions beyond two digits round half away from
    /// zero, so `"5999.995"` becomes 600000 kobo.
    pub fn parse_naira(input: &str) -> Result<Money, MoneyError> {
        let text = input.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MoneyError::Parse(input.to_string()));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyError::Parse(input.to_string()));
        }

        let naira: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| MoneyError::Overflow(input.to_string()))?
        };

        let mut frac = frac_part.bytes();
        let tens = i64::from(frac.next().map_or(0, |b| b - b'0'));
        let units = i64::from(frac.next().map_or(0, |b| b - b'0'));
        let mut kobo_frac = tens * 10 + units;
        // The third fraction digit decides the rounding. Anything after it is
        // strictly less than half a kobo and cannot change the result.
        if frac.next().is_some_and(|b| b >= b'5') {
            kobo_frac += 1;
        }

        let magnitude = naira
            .checked_mul(KOBO_PER_NAIRA)
            .and_then(|k| k.checked_add(kobo_frac))
            .ok_or_else(|| MoneyError::Overflow(input.to_string()))?;
        Ok(Money(if negative { -magnitude } else { magnitude }))
    }

    pub fn kobo(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_mul(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }

    pub fn sum<I: IntoIterator<Item = Money>>(amounts: I) -> Money {
        amounts
            .into_iter()
            .fold(Money::ZERO, |acc, m| acc.saturating_add(m))
    }

    /// Renders the amount as a plain decimal string, e.g. `"5999.00"`.
    ///
    /// This is the format the orders API expects for amount fields.
    pub fn to_naira_string(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            abs / KOBO_PER_NAIRA as u64,
            abs % KOBO_PER_NAIRA as u64
        )
    }

    /// Renders the amount with the Naira sign for display, e.g. `"₦5999.00"`.
    pub fn display(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}₦{}.{:02}",
            sign,
            abs / KOBO_PER_NAIRA as u64,
            abs % KOBO_PER_NAIRA as u64
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
