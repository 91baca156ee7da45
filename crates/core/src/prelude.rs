//! Encore prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    add_ons::{AddOn, AddOnId, AddOnSelection},
    catalog::Catalog,
    composer::{BookingComposer, Composition, ValidationError},
    discounts::{DiscountError, PromotionDiscount},
    drafts::{BookingDraft, DraftError, TimeWindow},
    offerings::{Availability, Offering, OfferingId, OfferingKind, PricingUnit},
    pricing::{PriceSummary, PricingError, PromotionOutcome, price_summary},
    promotions::{Ineligibility, PromotionCode, PromotionId, UsageBudget, ValidityWindow},
    receipt::{ReceiptError, write_receipt},
};
