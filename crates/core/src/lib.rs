//! Encore
//!
//! Booking composition for a karaoke venue: offerings, add-ons and promotion
//! codes are combined into a draft, priced and validated before submission.

pub mod add_ons;
pub mod catalog;
pub mod composer;
pub mod discounts;
pub mod drafts;
pub mod ids;
pub mod offerings;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod receipt;
