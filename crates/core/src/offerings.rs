//! Offerings
//!
//! The bookable units a venue sells: rooms, party packages and menu items.

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::ids::TypedId;

/// Offering Id
pub type OfferingId = TypedId<Offering<'static>>;

/// What kind of thing is being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferingKind {
    /// A karaoke room, sold by the hour.
    Room,

    /// A party package, sold per booking.
    PartyPackage,

    /// A food or drink item, sold per unit.
    MenuItem,
}

impl OfferingKind {
    /// The pricing unit an offering of this kind uses unless told otherwise.
    #[must_use]
    pub const fn default_pricing_unit(self) -> PricingUnit {
        match self {
            Self::Room => PricingUnit::PerHour,
            Self::PartyPackage => PricingUnit::PerBooking,
            Self::MenuItem => PricingUnit::PerUnit,
        }
    }

    /// Lowercase label used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::PartyPackage => "party package",
            Self::MenuItem => "menu item",
        }
    }
}

impl fmt::Display for OfferingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the base price scales with the booking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingUnit {
    /// Base price is charged per billable hour of the requested window.
    PerHour,

    /// Base price is charged per unit of quantity.
    PerUnit,

    /// Base price is charged once.
    PerBooking,
}

/// Availability status reported by the backend when the offering was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Availability {
    /// Open for booking.
    #[default]
    Available,

    /// Currently in use.
    Occupied,

    /// Out of service.
    Maintenance,
}

impl Availability {
    /// Lowercase label used in listings and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable unit with a base price and a capacity limit.
///
/// Offerings are immutable once fetched; a screen reload replaces them wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Offering<'a> {
    id: OfferingId,
    kind: OfferingKind,
    name: String,
    base_price: Money<'a, Currency>,
    pricing_unit: PricingUnit,
    capacity: u32,
    availability: Availability,
}

impl<'a> Offering<'a> {
    /// Create an available offering using the kind's default pricing unit.
    pub fn new(
        id: OfferingId,
        kind: OfferingKind,
        name: impl Into<String>,
        base_price: Money<'a, Currency>,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            base_price,
            pricing_unit: kind.default_pricing_unit(),
            capacity,
            availability: Availability::Available,
        }
    }

    /// Override the pricing unit.
    #[must_use]
    pub fn with_pricing_unit(mut self, pricing_unit: PricingUnit) -> Self {
        self.pricing_unit = pricing_unit;
        self
    }

    /// Override the availability status.
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Offering id
    pub fn id(&self) -> &OfferingId {
        &self.id
    }

    /// Offering kind
    pub fn kind(&self) -> OfferingKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one pricing unit
    pub fn base_price(&self) -> Money<'a, Currency> {
        self.base_price
    }

    /// How the base price scales
    pub fn pricing_unit(&self) -> PricingUnit {
        self.pricing_unit
    }

    /// Maximum guest count or quantity
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Availability at fetch time
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Whether the offering can be booked at all.
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// Whether `quantity` falls within `1..=capacity`.
    pub fn accepts_quantity(&self, quantity: u32) -> bool {
        (1..=self.capacity).contains(&quantity)
    }

    /// Currency the offering is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.base_price.currency()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::VND;

    use super::*;

    fn room() -> Offering<'static> {
        Offering::new(
            OfferingId::new("vip-1"),
            OfferingKind::Room,
            "VIP 1",
            Money::from_minor(500_000, VND),
            10,
        )
    }

    #[test]
    fn kind_sets_default_pricing_unit() {
        assert_eq!(room().pricing_unit(), PricingUnit::PerHour);
        assert_eq!(
            OfferingKind::PartyPackage.default_pricing_unit(),
            PricingUnit::PerBooking
        );
        assert_eq!(
            OfferingKind::MenuItem.default_pricing_unit(),
            PricingUnit::PerUnit
        );
    }

    #[test]
    fn accepts_quantity_bounds_are_inclusive() {
        let room = room();

        assert!(!room.accepts_quantity(0));
        assert!(room.accepts_quantity(1));
        assert!(room.accepts_quantity(10));
        assert!(!room.accepts_quantity(11));
    }

    #[test]
    fn zero_capacity_accepts_nothing() {
        let room = Offering::new(
            OfferingId::new("closet"),
            OfferingKind::Room,
            "Closet",
            Money::from_minor(1, VND),
            0,
        );

        assert!(!room.accepts_quantity(1));
    }

    #[test]
    fn availability_builder_overrides_status() {
        let room = room().with_availability(Availability::Maintenance);

        assert!(!room.is_available());
        assert_eq!(room.availability().to_string(), "maintenance");
    }
}
