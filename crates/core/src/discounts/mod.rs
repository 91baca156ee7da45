//! Discount utilities
//!
//! Percent and fixed-amount discounts applied to a booking subtotal.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A discount amount is priced in a different currency than the subtotal.
    #[error("discount is in {found}, but subtotal is in {expected}")]
    CurrencyMismatch {
        /// Subtotal currency code
        expected: &'static str,

        /// Discount currency code
        found: &'static str,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How a promotion reduces the subtotal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PromotionDiscount<'a> {
    /// Take a percentage of the subtotal off (e.g., "10% off")
    PercentageOff(Percentage),

    /// Take a fixed amount off the subtotal (e.g., "200,000 off")
    AmountOff(Money<'a, Currency>),
}

impl PromotionDiscount<'_> {
    /// Percentage discount from percent points, so `10` means 10%.
    pub fn percent_points(points: u16) -> Self {
        Self::PercentageOff(Percentage::from(
            Decimal::from(points) / Decimal::ONE_HUNDRED,
        ))
    }
}

/// Calculate a percentage of a minor unit amount, rounded toward zero.
///
/// # Errors
///
/// Returns an error if:
/// - The percentage calculation overflows or cannot be safely represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Discount produced by `discount` on `subtotal`.
///
/// Fixed amounts are clamped to the subtotal. Percentages are floored, then
/// clamped to `max_discount` when present, then to the subtotal. The result is
/// never negative.
///
/// # Errors
///
/// Returns an error if a fixed amount or cap is in another currency, or if the
/// percentage cannot be represented.
pub fn discount_amount<'a>(
    discount: &PromotionDiscount<'a>,
    max_discount: Option<Money<'a, Currency>>,
    subtotal: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let currency = subtotal.currency();
    let subtotal_minor = subtotal.to_minor_units().max(0);

    let raw = match discount {
        PromotionDiscount::AmountOff(amount) => {
            ensure_currency(amount, currency)?;

            amount.to_minor_units()
        }
        PromotionDiscount::PercentageOff(percent) => {
            let amount = percent_of_minor(percent, subtotal_minor)?;

            match max_discount {
                Some(cap) => {
                    ensure_currency(&cap, currency)?;

                    amount.min(cap.to_minor_units())
                }
                None => amount,
            }
        }
    };

    Ok(Money::from_minor(raw.clamp(0, subtotal_minor), currency))
}

fn ensure_currency(amount: &Money<'_, Currency>, currency: &Currency) -> Result<(), DiscountError> {
    if amount.currency() == currency {
        Ok(())
    } else {
        Err(DiscountError::CurrencyMismatch {
            expected: currency.iso_alpha_code,
            found: amount.currency().iso_alpha_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use decimal_percentage::Percentage;
    use rusty_money::iso::{USD, VND};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_toward_zero() -> TestResult {
        let percent = Percentage::from(Decimal::from(15) / Decimal::ONE_HUNDRED);

        // 15% of 999 is 149.85
        assert_eq!(percent_of_minor(&percent, 999)?, 149);

        Ok(())
    }

    #[test]
    fn percent_points_converts_to_fraction() -> TestResult {
        let discount = PromotionDiscount::percent_points(10);
        let amount = discount_amount(&discount, None, Money::from_minor(850_000, VND))?;

        assert_eq!(amount, Money::from_minor(85_000, VND));

        Ok(())
    }

    #[test]
    fn fixed_discount_clamps_to_subtotal() -> TestResult {
        let discount = PromotionDiscount::AmountOff(Money::from_minor(2_000_000, VND));
        let amount = discount_amount(&discount, None, Money::from_minor(800_000, VND))?;

        assert_eq!(amount, Money::from_minor(800_000, VND));

        Ok(())
    }

    #[test]
    fn percent_discount_clamps_to_max_discount() -> TestResult {
        let discount = PromotionDiscount::percent_points(50);
        let amount = discount_amount(
            &discount,
            Some(Money::from_minor(100_000, VND)),
            Money::from_minor(1_000_000, VND),
        )?;

        assert_eq!(amount, Money::from_minor(100_000, VND));

        Ok(())
    }

    #[test]
    fn percent_above_hundred_never_exceeds_subtotal() -> TestResult {
        let discount = PromotionDiscount::percent_points(150);
        let amount = discount_amount(&discount, None, Money::from_minor(400, VND))?;

        assert_eq!(amount, Money::from_minor(400, VND));

        Ok(())
    }

    #[test]
    fn negative_fixed_amount_is_floored_at_zero() -> TestResult {
        let discount = PromotionDiscount::AmountOff(Money::from_minor(-500, VND));
        let amount = discount_amount(&discount, None, Money::from_minor(400, VND))?;

        assert_eq!(amount, Money::from_minor(0, VND));

        Ok(())
    }

    #[test]
    fn fixed_discount_in_other_currency_errors() {
        let discount = PromotionDiscount::AmountOff(Money::from_minor(500, USD));
        let result = discount_amount(&discount, None, Money::from_minor(400, VND));

        assert!(matches!(
            result,
            Err(DiscountError::CurrencyMismatch {
                expected: "VND",
                found: "USD"
            })
        ));
    }
}
