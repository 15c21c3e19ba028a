//! Money type for representing monetary values.
//!
//! Amounts are integer counts of the currency's minor unit (paise for INR),
//! and every arithmetic operation is checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "\u{20b9}").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units per major unit (100 paise to the rupee).
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub minor_units: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub const fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Create a Money value from a whole number of major units.
    ///
    /// ```
    /// use techknot_shop::money::{Currency, Money};
    /// let price = Money::from_major(699, Currency::INR);
    /// assert_eq!(price.minor_units, 69900);
    /// ```
    pub fn from_major(major: i64, currency: Currency) -> Self {
        Self::new(major.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Format as a display string (e.g., "\u{20b9}699.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "699.00").
    pub fn display_amount(&self) -> String {
        let per_major = self.currency.minor_per_major() as u64;
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let places = self.currency.decimal_places() as usize;
        format!("{sign}{}.{:0places$}", abs / per_major, abs % per_major)
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|sum| Money::new(sum, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.minor_units
            .checked_mul(factor)
            .map(|product| Money::new(product, self.currency))
    }

    /// Apply a rate expressed in basis points (1800 = 18%), rounding half away
    /// from zero to the nearest minor unit.
    pub fn try_apply_rate_bps(&self, bps: u32) -> Option<Money> {
        let scaled = i128::from(self.minor_units) * i128::from(bps);
        round_half_away(scaled, 10_000).map(|amount| Money::new(amount, self.currency))
    }

    /// Round half away from zero to a whole number of major units.
    pub fn try_round_to_major(&self) -> Option<Money> {
        let per_major = self.currency.minor_per_major();
        round_half_away(i128::from(self.minor_units), i128::from(per_major))
            .and_then(|major| major.checked_mul(per_major))
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

/// `value / divisor` rounded half away from zero, if it fits in an i64.
fn round_half_away(value: i128, divisor: i128) -> Option<i64> {
    let rounded = (value.abs() + divisor / 2) / divisor * value.signum();
    i64::try_from(rounded).ok()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(699, Currency::INR);
        assert_eq!(m.minor_units, 69900);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(69900, Currency::INR).display(), "\u{20b9}699.00");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5, Currency::INR).display_amount(), "0.05");
        assert_eq!(Money::new(-150, Currency::INR).display_amount(), "-1.50");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::INR);
        let b = Money::new(500, Currency::INR);
        assert_eq!(a.try_add(&b).unwrap().minor_units, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert!(inr.try_add(&usd).is_none());
        assert!(Money::try_sum([inr, usd].iter(), Currency::INR).is_none());
    }

    #[test]
    fn test_money_sum() {
        let prices = [Money::from_major(699, Currency::INR), Money::from_major(798, Currency::INR)];
        let total = Money::try_sum(prices.iter(), Currency::INR).unwrap();
        assert_eq!(total, Money::from_major(1497, Currency::INR));
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::INR),
            Some(Money::zero(Currency::INR))
        );
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::new(i64::MAX, Currency::INR);
        assert!(big.try_add(&Money::new(1, Currency::INR)).is_none());
        assert!(big.try_multiply(2).is_none());
        assert!(big.try_round_to_major().is_none());
    }

    #[test]
    fn test_rate_rounding() {
        // 1497.00 * 18% = 269.46
        let subtotal = Money::from_major(1497, Currency::INR);
        assert_eq!(subtotal.try_apply_rate_bps(1800).unwrap().minor_units, 26946);

        // 3 paise: 0.54 -> 1, 0.3 -> 0, 1.5 -> 2
        let tiny = Money::new(3, Currency::INR);
        assert_eq!(tiny.try_apply_rate_bps(1800).unwrap().minor_units, 1);
        assert_eq!(tiny.try_apply_rate_bps(1000).unwrap().minor_units, 0);
        assert_eq!(tiny.try_apply_rate_bps(5000).unwrap().minor_units, 2);
    }

    #[test]
    fn test_round_to_major() {
        let round = |minor| Money::new(minor, Currency::INR).try_round_to_major().unwrap().minor_units;
        assert_eq!(round(26946), 26900);
        assert_eq!(round(26982), 27000);
        assert_eq!(round(1650), 1700);
        assert_eq!(round(1649), 1600);
        assert_eq!(round(-1650), -1700);
        assert_eq!(round(0), 0);
    }
}
