//! Monetary amounts held as integer cents.
//!
//! Fees and tuition are summed and scaled by tuition-rate factors, so amounts
//! are stored as whole cents and only converted to floating point for the
//! multiplication itself.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// An amount of money in cents. Serializes as the bare cent count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by `factor`, rounding half away from zero to the nearest cent.
    ///
    /// Returns `None` when the result is not finite or does not fit in `i64` cents.
    pub fn scale(self, factor: f64) -> Option<Self> {
        let scaled = (self.0 as f64 * factor).round();
        // i64::MAX as f64 rounds up to 2^63, hence the exclusive upper bound
        if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
            Some(Self(scaled as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Money::from_dollars(750).to_string(), "$750.00");
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
    }

    #[test]
    fn test_scale_by_tuition_factor() {
        assert_eq!(Money::from_dollars(500).scale(1.5), Some(Money::from_dollars(750)));
        assert_eq!(Money::from_dollars(500).scale(0.9), Some(Money::from_dollars(450)));
        // 1099 * 1.075 = 1181.425
        assert_eq!(Money::from_cents(1099).scale(1.075), Some(Money::from_cents(1181)));
    }

    #[test]
    fn test_scale_out_of_range_is_none() {
        assert_eq!(Money::from_cents(i64::MAX).scale(1.1), None);
        assert_eq!(Money::from_cents(i64::MIN).scale(2.0), None);
        assert_eq!(Money::from_dollars(500).scale(f64::NAN), None);
        assert_eq!(Money::from_dollars(500).scale(f64::INFINITY), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            Money::from_cents(10).checked_add(Money::from_cents(5)),
            Some(Money::from_cents(15))
        );
        assert_eq!(Money::from_cents(i64::MAX - 10).checked_add(Money::from_cents(11)), None);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let mut fees = Money::from_dollars(100);
        fees += Money::from_cents(50);
        fees -= Money::from_dollars(20);
        assert_eq!(fees, Money::from_cents(8050));

        let total: Money = [Money::from_dollars(1), Money::from_dollars(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_dollars(3));
    }

    #[test]
    fn test_cents_and_sign() {
        assert_eq!(Money::from_dollars(2).cents(), 200);
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
    }
}
