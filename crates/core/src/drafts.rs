//! Booking Drafts
//!
//! The client-only aggregate a booking form mutates. A draft lives from the
//! moment a booking form opens until it is discarded or submitted; it is
//! never persisted and never carries a stored total.

use jiff::Timestamp;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    add_ons::{AddOn, AddOnId, AddOnSelection},
    offerings::{Offering, PricingUnit},
    promotions::PromotionCode,
};

const SECONDS_PER_HOUR: i64 = 3_600;

/// Errors raised while editing a draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// A selection is priced in a different currency than the draft.
    #[error("{0} is priced in {1}, but the booking is in {2}")]
    CurrencyMismatch(&'static str, &'static str, &'static str),
}

/// Requested start and end of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TimeWindow {
    /// Create a window. Ordering is checked when the draft is validated, not here.
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Requested start
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Requested end
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether the end is strictly after the start.
    pub fn is_ordered(&self) -> bool {
        self.end > self.start
    }

    /// Length of the window in whole seconds, negative if reversed.
    pub fn duration_seconds(&self) -> i64 {
        self.end.as_second().saturating_sub(self.start.as_second())
    }

    /// Hours charged for the window: partial hours round up, empty or reversed
    /// windows charge nothing.
    pub fn billable_hours(&self) -> u32 {
        let seconds = self.duration_seconds();

        if seconds <= 0 {
            return 0;
        }

        let hours = seconds.div_euclid(SECONDS_PER_HOUR)
            + i64::from(seconds.rem_euclid(SECONDS_PER_HOUR) != 0);

        u32::try_from(hours).unwrap_or(u32::MAX)
    }
}

/// In-progress booking selection.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft<'a> {
    currency: &'a Currency,
    offering: Option<Offering<'a>>,
    add_ons: AddOnSelection<'a>,
    promotion: Option<PromotionCode<'a>>,
    quantity: u32,
    window: Option<TimeWindow>,
    note: Option<String>,
}

impl<'a> BookingDraft<'a> {
    /// Create an empty draft priced in `currency`, with a quantity of one.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            currency,
            offering: None,
            add_ons: AddOnSelection::new(),
            promotion: None,
            quantity: 1,
            window: None,
            note: None,
        }
    }

    /// Select the offering being booked, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::CurrencyMismatch`] if the offering is priced in another currency.
    pub fn select_offering(
        &mut self,
        offering: Offering<'a>,
    ) -> Result<Option<Offering<'a>>, DraftError> {
        self.ensure_currency("offering", offering.currency())?;

        Ok(self.offering.replace(offering))
    }

    /// Attach an add-on. Returns `false` if it was already attached.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::CurrencyMismatch`] if the add-on is priced in another currency.
    pub fn add_add_on(&mut self, add_on: AddOn<'a>) -> Result<bool, DraftError> {
        self.ensure_currency("add-on", add_on.price().currency())?;

        Ok(self.add_ons.insert(add_on))
    }

    /// Detach an add-on by id.
    pub fn remove_add_on(&mut self, id: &AddOnId) -> Option<AddOn<'a>> {
        self.add_ons.remove(id)
    }

    /// Apply a promotion code, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::CurrencyMismatch`] if any amount on the code is in another currency.
    pub fn apply_promotion(
        &mut self,
        promotion: PromotionCode<'a>,
    ) -> Result<Option<PromotionCode<'a>>, DraftError> {
        if !promotion.is_priced_in(self.currency) {
            return Err(DraftError::CurrencyMismatch(
                "promotion",
                promotion.minimum_order().currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        Ok(self.promotion.replace(promotion))
    }

    /// Remove the promotion code.
    pub fn clear_promotion(&mut self) -> Option<PromotionCode<'a>> {
        self.promotion.take()
    }

    /// Set the guest count or quantity.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Set the requested time window.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    /// Clear the requested time window.
    pub fn clear_window(&mut self) {
        self.window = None;
    }

    /// Set or clear the free-text note.
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note.filter(|note| !note.trim().is_empty());
    }

    /// Currency every amount on the draft is priced in
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Selected offering
    pub fn offering(&self) -> Option<&Offering<'a>> {
        self.offering.as_ref()
    }

    /// Selected add-ons
    pub fn add_ons(&self) -> &AddOnSelection<'a> {
        &self.add_ons
    }

    /// Selected promotion code
    pub fn promotion(&self) -> Option<&PromotionCode<'a>> {
        self.promotion.as_ref()
    }

    /// Guest count or quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Requested time window
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Free-text note
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Units the offering's base price is multiplied by.
    ///
    /// Hourly offerings charge for the window's billable hours, unit-priced
    /// offerings for the quantity, and per-booking offerings once. Without an
    /// offering there is nothing to charge.
    pub fn billable_units(&self) -> u32 {
        let Some(offering) = &self.offering else {
            return 0;
        };

        match offering.pricing_unit() {
            PricingUnit::PerHour => self.window.map_or(0, |window| window.billable_hours()),
            PricingUnit::PerUnit => self.quantity,
            PricingUnit::PerBooking => 1,
        }
    }

    fn ensure_currency(&self, what: &'static str, currency: &Currency) -> Result<(), DraftError> {
        if currency == self.currency {
            Ok(())
        } else {
            Err(DraftError::CurrencyMismatch(
                what,
                currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }
}
