//! Booking Composer
//!
//! Pure computation of a price summary and validity flags from a draft.
//! Recomputed on every edit; nothing it produces is stored on the draft.

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    drafts::BookingDraft,
    offerings::{Availability, PricingUnit},
    pricing::{PriceSummary, PricingError, PromotionOutcome, price_summary},
};

/// Local, pre-submission problems with a draft. Every variant blocks submission.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Nothing has been selected to book.
    #[error("no offering selected")]
    NoOfferingSelected,

    /// The offering cannot be booked right now.
    #[error("offering is {0}")]
    OfferingUnavailable(Availability),

    /// Guest count or quantity is outside `1..=capacity`.
    #[error("capacity exceeded: {quantity} requested, {capacity} allowed")]
    CapacityExceeded {
        /// Requested guest count or quantity
        quantity: u32,

        /// Offering capacity
        capacity: u32,
    },

    /// An hourly offering needs a time window.
    #[error("invalid date: no time selected")]
    MissingWindow,

    /// The requested window starts in the past.
    #[error("invalid date: booking starts before now")]
    StartsInPast,

    /// The requested window ends at or before its start.
    #[error("invalid date: booking ends before it starts")]
    EndsBeforeStart,

    /// The draft could not be priced.
    #[error("price unavailable")]
    PricingUnavailable(#[from] PricingError),
}

/// Result of composing a draft: what it costs and whether it can be submitted.
#[derive(Debug)]
pub struct Composition<'a> {
    summary: PriceSummary<'a>,
    promotion: PromotionOutcome<'a>,
    violations: SmallVec<[ValidationError; 2]>,
}

impl<'a> Composition<'a> {
    /// Price breakdown. Zero when the draft could not be priced.
    pub fn summary(&self) -> &PriceSummary<'a> {
        &self.summary
    }

    /// What happened to the promotion code.
    pub fn promotion(&self) -> &PromotionOutcome<'a> {
        &self.promotion
    }

    /// Every blocking problem found.
    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    /// Whether the draft may be submitted.
    pub fn can_submit(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume the composition, returning the blocking problems.
    pub fn into_violations(self) -> SmallVec<[ValidationError; 2]> {
        self.violations
    }
}

/// Prices and validates booking drafts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingComposer;

impl BookingComposer {
    /// Compose `draft` as of `now`.
    ///
    /// Never fails: a draft that cannot be priced composes to a zero summary
    /// with a [`ValidationError::PricingUnavailable`] violation.
    pub fn compose<'a>(draft: &BookingDraft<'a>, now: Timestamp) -> Composition<'a> {
        let mut violations = Self::validate(draft, now);

        let (summary, promotion) = match price_summary(draft, now) {
            Ok(priced) => priced,
            Err(error) => {
                violations.push(ValidationError::PricingUnavailable(error));

                (PriceSummary::zero(draft.currency()), PromotionOutcome::None)
            }
        };

        Composition {
            summary,
            promotion,
            violations,
        }
    }

    /// Run the blocking checks on `draft` as of `now`.
    ///
    /// Promotion eligibility is not checked here: an ineligible code only
    /// zeroes the discount.
    pub fn validate(draft: &BookingDraft<'_>, now: Timestamp) -> SmallVec<[ValidationError; 2]> {
        let mut violations = SmallVec::new();

        let Some(offering) = draft.offering() else {
            violations.push(ValidationError::NoOfferingSelected);

            return violations;
        };

        if !offering.is_available() {
            violations.push(ValidationError::OfferingUnavailable(
                offering.availability(),
            ));
        }

        if !offering.accepts_quantity(draft.quantity()) {
            violations.push(ValidationError::CapacityExceeded {
                quantity: draft.quantity(),
                capacity: offering.capacity(),
            });
        }

        match draft.window() {
            Some(window) => {
                if window.start() < now {
                    violations.push(ValidationError::StartsInPast);
                }

                if !window.is_ordered() {
                    violations.push(ValidationError::EndsBeforeStart);
                }
            }
            None if offering.pricing_unit() == PricingUnit::PerHour => {
                violations.push(ValidationError::MissingWindow);
            }
            None => {}
        }

        violations
    }
}
