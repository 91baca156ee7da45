//! Pricing
//!
//! Subtotal, discount and total for a booking draft. Nothing here is stored:
//! every summary is recomputed from the draft it describes.

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::DiscountError,
    drafts::BookingDraft,
    offerings::Offering,
    promotions::{Ineligibility, PromotionCode},
};

/// Errors that can occur while pricing a draft.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Base price multiplied by the billable units does not fit in minor units.
    #[error("price overflowed when charging {0} units")]
    Overflow(u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from discount calculation.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Sums a list of prices, starting from zero in `currency`.
///
/// # Errors
///
/// Returns a [`MoneyError`] if any price is in a different currency.
pub fn total_price<'a>(
    prices: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    prices
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, price| acc.add(price))
}

/// Charge for `units` of an offering's pricing unit.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    offering: &Offering<'a>,
    units: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = offering
        .base_price()
        .to_minor_units()
        .checked_mul(i64::from(units))
        .ok_or(PricingError::Overflow(units))?;

    Ok(Money::from_minor(minor, offering.currency()))
}

/// Computed price breakdown for a draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PriceSummary<'a> {
    /// A summary where everything is zero.
    pub fn zero(currency: &'a Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            discount: zero,
            total: zero,
        }
    }

    /// Offering charge plus add-ons, before any discount
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount taken off by the promotion
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount payable, never negative
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency of every amount in the summary
    pub fn currency(&self) -> &'a Currency {
        self.subtotal.currency()
    }
}

/// What happened to the draft's promotion code during pricing.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionOutcome<'a> {
    /// No code was entered.
    None,

    /// The code was honoured.
    Applied {
        /// Code as entered
        code: String,

        /// Discount it produced
        discount: Money<'a, Currency>,
    },

    /// The code was ignored and the discount forced to zero.
    NotApplicable {
        /// Code as entered
        code: String,

        /// Why it was ignored
        reason: Ineligibility<'a>,
    },
}

impl PromotionOutcome<'_> {
    /// Whether the outcome should be surfaced to the user as a notice.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }
}

/// Subtotal of a draft: offering charge for its billable units plus add-ons.
///
/// A draft without an offering only charges for its add-ons.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or currency mismatch.
pub fn subtotal<'a>(draft: &BookingDraft<'a>) -> Result<Money<'a, Currency>, PricingError> {
    let add_ons = draft.add_ons().total(draft.currency())?;

    let Some(offering) = draft.offering() else {
        return Ok(add_ons);
    };

    Ok(line_total(offering, draft.billable_units())?.add(add_ons)?)
}

/// Discount and total for a subtotal under an optional promotion at `now`.
///
/// # Errors
///
/// Returns a [`PricingError`] if the discount cannot be computed.
pub fn summarize<'a>(
    subtotal: Money<'a, Currency>,
    promotion: Option<&PromotionCode<'a>>,
    now: Timestamp,
) -> Result<(PriceSummary<'a>, PromotionOutcome<'a>), PricingError> {
    let zero = Money::from_minor(0, subtotal.currency());

    let (discount, outcome) = match promotion {
        None => (zero, PromotionOutcome::None),
        Some(promotion) => match promotion.eligibility(subtotal, now) {
            Ok(()) => {
                let discount = promotion.discount_for(subtotal)?;

                (
                    discount,
                    PromotionOutcome::Applied {
                        code: promotion.code().to_string(),
                        discount,
                    },
                )
            }
            Err(reason) => (
                zero,
                PromotionOutcome::NotApplicable {
                    code: promotion.code().to_string(),
                    reason,
                },
            ),
        },
    };

    let total = Money::from_minor(
        subtotal
            .to_minor_units()
            .saturating_sub(discount.to_minor_units())
            .max(0),
        subtotal.currency(),
    );

    Ok((
        PriceSummary {
            subtotal,
            discount,
            total,
        },
        outcome,
    ))
}

/// Price a draft at `now`.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow, currency mismatch or discount failure.
pub fn price_summary<'a>(
    draft: &BookingDraft<'a>,
    now: Timestamp,
) -> Result<(PriceSummary<'a>, PromotionOutcome<'a>), PricingError> {
    summarize(subtotal(draft)?, draft.promotion(), now)
}
