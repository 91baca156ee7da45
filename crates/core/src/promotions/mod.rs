//! Promotions
//!
//! Promotion codes and the eligibility rules that decide whether a code is
//! honoured for a given subtotal at a given moment.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, PromotionDiscount, discount_amount},
    ids::TypedId,
};

pub mod budget;

pub use budget::UsageBudget;

/// Promotion Id
pub type PromotionId = TypedId<PromotionCode<'static>>;

/// Inclusive window during which a promotion can be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    valid_from: Timestamp,
    valid_to: Timestamp,
}

impl ValidityWindow {
    /// Create a window from its inclusive bounds.
    pub const fn new(valid_from: Timestamp, valid_to: Timestamp) -> Self {
        Self {
            valid_from,
            valid_to,
        }
    }

    /// A window that is always open.
    pub const fn always() -> Self {
        Self::new(Timestamp::MIN, Timestamp::MAX)
    }

    /// First instant the promotion can be redeemed
    pub const fn valid_from(&self) -> Timestamp {
        self.valid_from
    }

    /// Last instant the promotion can be redeemed
    pub const fn valid_to(&self) -> Timestamp {
        self.valid_to
    }

    /// Whether `now` falls within the window.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.valid_from <= now && now <= self.valid_to
    }
}

/// Why a promotion code was not honoured.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Ineligibility<'a> {
    /// The validity window has not opened yet.
    #[error("promotion not applicable: valid from {valid_from}")]
    NotYetValid {
        /// Window start
        valid_from: Timestamp,
    },

    /// The validity window has closed.
    #[error("promotion not applicable: expired at {valid_to}")]
    Expired {
        /// Window end
        valid_to: Timestamp,
    },

    /// Every redemption has been used.
    #[error("promotion not applicable: no redemptions left")]
    Exhausted,

    /// The subtotal is below the promotion's minimum order.
    #[error("promotion not applicable: minimum order is {minimum}")]
    BelowMinimumOrder {
        /// Required subtotal
        minimum: Money<'a, Currency>,
    },
}

/// A discount rule with eligibility constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionCode<'a> {
    id: PromotionId,
    code: String,
    discount: PromotionDiscount<'a>,
    max_discount: Option<Money<'a, Currency>>,
    minimum_order: Money<'a, Currency>,
    validity: ValidityWindow,
    usage: UsageBudget,
}

impl<'a> PromotionCode<'a> {
    /// Create an uncapped promotion code.
    pub fn new(
        id: PromotionId,
        code: impl Into<String>,
        discount: PromotionDiscount<'a>,
        minimum_order: Money<'a, Currency>,
        validity: ValidityWindow,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            discount,
            max_discount: None,
            minimum_order,
            validity,
            usage: UsageBudget::unlimited(),
        }
    }

    /// Cap the discount a percentage promotion can produce.
    #[must_use]
    pub fn with_max_discount(mut self, max_discount: Money<'a, Currency>) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    /// Attach a redemption budget.
    #[must_use]
    pub fn with_usage(mut self, usage: UsageBudget) -> Self {
        self.usage = usage;
        self
    }

    /// Promotion id
    pub fn id(&self) -> &PromotionId {
        &self.id
    }

    /// Code the customer enters
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount rule
    pub fn discount(&self) -> &PromotionDiscount<'a> {
        &self.discount
    }

    /// Optional cap on the discount
    pub fn max_discount(&self) -> Option<Money<'a, Currency>> {
        self.max_discount
    }

    /// Smallest subtotal the code applies to
    pub fn minimum_order(&self) -> Money<'a, Currency> {
        self.minimum_order
    }

    /// Redemption window
    pub fn validity(&self) -> ValidityWindow {
        self.validity
    }

    /// Redemption budget
    pub fn usage(&self) -> UsageBudget {
        self.usage
    }

    /// Whether every amount on the code is in `currency`.
    pub fn is_priced_in(&self, currency: &Currency) -> bool {
        let discount_currency = match &self.discount {
            PromotionDiscount::AmountOff(amount) => Some(amount.currency()),
            PromotionDiscount::PercentageOff(_) => None,
        };

        self.minimum_order.currency() == currency
            && discount_currency.is_none_or(|c| c == currency)
            && self
                .max_discount
                .is_none_or(|max| max.currency() == currency)
    }

    /// Check whether the code is honoured for `subtotal` at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Ineligibility`] found, checking the validity window,
    /// then the redemption budget, then the minimum order.
    pub fn eligibility(
        &self,
        subtotal: Money<'a, Currency>,
        now: Timestamp,
    ) -> Result<(), Ineligibility<'a>> {
        if now < self.validity.valid_from() {
            return Err(Ineligibility::NotYetValid {
                valid_from: self.validity.valid_from(),
            });
        }

        if now > self.validity.valid_to() {
            return Err(Ineligibility::Expired {
                valid_to: self.validity.valid_to(),
            });
        }

        if self.usage.is_exhausted() {
            return Err(Ineligibility::Exhausted);
        }

        if subtotal.to_minor_units() < self.minimum_order.to_minor_units() {
            return Err(Ineligibility::BelowMinimumOrder {
                minimum: self.minimum_order,
            });
        }

        Ok(())
    }

    /// Discount this code produces on `subtotal`, ignoring eligibility.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be computed.
    pub fn discount_for(
        &self,
        subtotal: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        discount_amount(&self.discount, self.max_discount, subtotal)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rusty_money::iso::{USD, VND};
    use testresult::TestResult;

    use super::*;

    fn ten_percent(minimum: i64, validity: ValidityWindow) -> PromotionCode<'static> {
        PromotionCode::new(
            PromotionId::new("promo-1"),
            "KARAOKE10",
            PromotionDiscount::percent_points(10),
            Money::from_minor(minimum, VND),
            validity,
        )
    }

    #[test]
    fn eligible_when_open_and_above_minimum() {
        let promo = ten_percent(500_000, ValidityWindow::always());

        assert_eq!(
            promo.eligibility(Money::from_minor(500_000, VND), Timestamp::now()),
            Ok(())
        );
    }

    #[test]
    fn below_minimum_is_ineligible() {
        let promo = ten_percent(1_000_000, ValidityWindow::always());

        assert_eq!(
            promo.eligibility(Money::from_minor(850_000, VND), Timestamp::now()),
            Err(Ineligibility::BelowMinimumOrder {
                minimum: Money::from_minor(1_000_000, VND)
            })
        );
    }

    #[test]
    fn window_bounds_are_inclusive() -> TestResult {
        let from: Timestamp = "2026-11-01T00:00:00Z".parse()?;
        let to: Timestamp = "2026-11-30T23:59:59Z".parse()?;
        let promo = ten_percent(0, ValidityWindow::new(from, to));
        let subtotal = Money::from_minor(100, VND);

        assert_eq!(promo.eligibility(subtotal, from), Ok(()));
        assert_eq!(promo.eligibility(subtotal, to), Ok(()));
        assert_eq!(
            promo.eligibility(subtotal, from - SignedDuration::from_secs(1)),
            Err(Ineligibility::NotYetValid { valid_from: from })
        );
        assert_eq!(
            promo.eligibility(subtotal, to + SignedDuration::from_secs(1)),
            Err(Ineligibility::Expired { valid_to: to })
        );

        Ok(())
    }

    #[test]
    fn exhausted_budget_is_ineligible() {
        let promo = ten_percent(0, ValidityWindow::always())
            .with_usage(UsageBudget::with_redemption_limit(100, 100));

        assert_eq!(
            promo.eligibility(Money::from_minor(100, VND), Timestamp::now()),
            Err(Ineligibility::Exhausted)
        );
    }

    #[test]
    fn discount_for_respects_max_discount() -> TestResult {
        let promo = ten_percent(0, ValidityWindow::always())
            .with_max_discount(Money::from_minor(50_000, VND));

        assert_eq!(
            promo.discount_for(Money::from_minor(2_000_000, VND))?,
            Money::from_minor(50_000, VND)
        );

        Ok(())
    }

    #[test]
    fn is_priced_in_checks_every_amount() {
        let percent = ten_percent(0, ValidityWindow::always());
        let fixed_usd = PromotionCode::new(
            PromotionId::new("promo-2"),
            "FLAT5",
            PromotionDiscount::AmountOff(Money::from_minor(500, USD)),
            Money::from_minor(0, VND),
            ValidityWindow::always(),
        );

        assert!(percent.is_priced_in(VND));
        assert!(!percent.is_priced_in(USD));
        assert!(!fixed_usd.is_priced_in(VND));
    }

    #[test]
    fn ineligibility_messages_mention_reason() {
        let message = Ineligibility::Exhausted.to_string();

        assert!(message.starts_with("promotion not applicable"));
    }
}
