//! Offering and add-on DTOs.

use encore::{
    add_ons::{AddOn, AddOnId},
    offerings::{Availability, Offering, OfferingId, OfferingKind, PricingUnit},
};
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::dto::{NormalizeError, RawAmount, RawId, first_present, fold_variant, required};

/// Offering as returned by `GET /offerings`.
///
/// Every spelling is read independently; see [`normalize_offering`] for which
/// one wins when several are sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffering {
    pub id: Option<RawId>,

    #[serde(rename = "_id")]
    pub object_id: Option<RawId>,

    #[serde(alias = "room_id")]
    pub room_id: Option<RawId>,

    #[serde(alias = "package_id")]
    pub package_id: Option<RawId>,

    pub kind: Option<String>,

    #[serde(rename = "type")]
    pub type_name: Option<String>,

    pub category: Option<String>,

    pub name: Option<String>,

    #[serde(alias = "room_name")]
    pub room_name: Option<String>,

    pub title: Option<String>,

    pub price: Option<RawAmount>,

    #[serde(alias = "base_price")]
    pub base_price: Option<RawAmount>,

    #[serde(alias = "price_per_hour")]
    pub price_per_hour: Option<RawAmount>,

    #[serde(alias = "pricing_unit")]
    pub pricing_unit: Option<String>,

    pub unit: Option<String>,

    pub capacity: Option<u32>,

    #[serde(alias = "max_guests")]
    pub max_guests: Option<u32>,

    #[serde(alias = "max_capacity")]
    pub max_capacity: Option<u32>,

    pub availability: Option<RawAvailability>,

    pub status: Option<String>,

    #[serde(alias = "is_available")]
    pub is_available: Option<bool>,
}

/// Availability sent as a flag or a status word.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawAvailability {
    /// `true` when free
    Flag(bool),

    /// Status word such as `"available"` or `"maintenance"`
    Status(String),
}

/// Add-on as returned by `GET /add-ons`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddOn {
    pub id: Option<RawId>,

    #[serde(rename = "_id")]
    pub object_id: Option<RawId>,

    #[serde(alias = "service_id")]
    pub service_id: Option<RawId>,

    pub name: Option<String>,

    #[serde(alias = "service_name")]
    pub service_name: Option<String>,

    pub title: Option<String>,

    pub price: Option<RawAmount>,

    #[serde(alias = "unit_price")]
    pub unit_price: Option<RawAmount>,

    pub amount: Option<RawAmount>,
}

/// Normalise an offering priced in `currency`.
///
/// When a field arrives under several spellings the generic name wins over
/// the legacy ones: `id` over `_id` over `roomId` over `packageId`, `kind`
/// over `type` over `category`, `name` over `roomName` over `title`, `price`
/// over `basePrice` over `pricePerHour`, `capacity` over `maxGuests` over
/// `maxCapacity`. For availability a status word (`availability`, then
/// `status`) wins over the `isAvailable` flag, since it can say why a room is
/// closed.
///
/// A missing kind is read as a room; a missing pricing unit falls back to the
/// kind's default; missing availability is available.
///
/// # Errors
///
/// Returns a [`NormalizeError`] for a missing id, name, price or capacity, an
/// unreadable price, or an unknown kind, pricing unit or availability.
pub fn normalize_offering(
    raw: RawOffering,
    currency: &'static Currency,
) -> Result<Offering<'static>, NormalizeError> {
    let id = required(
        "id",
        [raw.id, raw.object_id, raw.room_id, raw.package_id],
    )?;

    let kind = first_present([raw.kind, raw.type_name, raw.category])
        .as_deref()
        .map_or(Ok(OfferingKind::Room), parse_kind)?;

    let pricing_unit = first_present([raw.pricing_unit, raw.unit])
        .as_deref()
        .map_or(Ok(kind.default_pricing_unit()), parse_pricing_unit)?;

    let availability = first_present([
        raw.availability,
        raw.status.map(RawAvailability::Status),
        raw.is_available.map(RawAvailability::Flag),
    ])
    .map_or(Ok(Availability::Available), parse_availability)?;

    let name = required("name", [raw.name, raw.room_name, raw.title])?;
    let price = required("price", [raw.price, raw.base_price, raw.price_per_hour])?;
    let capacity = required("capacity", [raw.capacity, raw.max_guests, raw.max_capacity])?;

    Ok(Offering::new(
        OfferingId::new(id.into_string()),
        kind,
        name,
        price.to_money("price", currency)?,
        capacity,
    )
    .with_pricing_unit(pricing_unit)
    .with_availability(availability))
}

/// Normalise an add-on priced in `currency`.
///
/// Precedence: `id` over `_id` over `serviceId`, `name` over `serviceName`
/// over `title`, `price` over `unitPrice` over `amount`.
///
/// # Errors
///
/// Returns a [`NormalizeError`] if the id, name or price is missing or the
/// price cannot be read.
pub fn normalize_add_on(
    raw: RawAddOn,
    currency: &'static Currency,
) -> Result<AddOn<'static>, NormalizeError> {
    let id = required("id", [raw.id, raw.object_id, raw.service_id])?;
    let name = required("name", [raw.name, raw.service_name, raw.title])?;
    let price = required("price", [raw.price, raw.unit_price, raw.amount])?;

    Ok(AddOn::new(
        AddOnId::new(id.into_string()),
        name,
        price.to_money("price", currency)?,
    ))
}

fn parse_kind(value: &str) -> Result<OfferingKind, NormalizeError> {
    match fold_variant(value).as_str() {
        "room" | "karaoke_room" | "vip_room" => Ok(OfferingKind::Room),
        "party" | "package" | "party_package" | "partypackage" => Ok(OfferingKind::PartyPackage),
        "menu" | "menu_item" | "menuitem" | "food" | "drink" => Ok(OfferingKind::MenuItem),
        _ => Err(NormalizeError::UnknownVariant {
            field: "kind",
            value: value.to_string(),
        }),
    }
}

fn parse_pricing_unit(value: &str) -> Result<PricingUnit, NormalizeError> {
    match fold_variant(value).as_str() {
        "hour" | "per_hour" | "hourly" => Ok(PricingUnit::PerHour),
        "unit" | "per_unit" | "item" | "each" => Ok(PricingUnit::PerUnit),
        "booking" | "per_booking" | "flat" | "package" => Ok(PricingUnit::PerBooking),
        _ => Err(NormalizeError::UnknownVariant {
            field: "pricing unit",
            value: value.to_string(),
        }),
    }
}

fn parse_availability(raw: RawAvailability) -> Result<Availability, NormalizeError> {
    let status = match raw {
        RawAvailability::Flag(true) => return Ok(Availability::Available),
        RawAvailability::Flag(false) => return Ok(Availability::Occupied),
        RawAvailability::Status(status) => status,
    };

    match fold_variant(&status).as_str() {
        "available" | "free" | "empty" | "open" | "true" => Ok(Availability::Available),
        "occupied" | "busy" | "in_use" | "booked" | "false" => Ok(Availability::Occupied),
        "maintenance" | "under_maintenance" | "repair" => Ok(Availability::Maintenance),
        _ => Err(NormalizeError::UnknownVariant {
            field: "availability",
            value: status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::VND};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn camel_case_room_normalises() -> TestResult {
        let raw: RawOffering = serde_json::from_str(
            r#"{
                "_id": "65f0c2",
                "type": "room",
                "roomName": "VIP 1",
                "pricePerHour": 500000,
                "maxGuests": 12,
                "isAvailable": true
            }"#,
        )?;

        let offering = normalize_offering(raw, VND)?;

        assert_eq!(offering.id().as_str(), "65f0c2");
        assert_eq!(offering.kind(), OfferingKind::Room);
        assert_eq!(offering.name(), "VIP 1");
        assert_eq!(offering.base_price(), Money::from_minor(500_000, VND));
        assert_eq!(offering.pricing_unit(), PricingUnit::PerHour);
        assert_eq!(offering.capacity(), 12);
        assert_eq!(offering.availability(), Availability::Available);

        Ok(())
    }

    #[test]
    fn snake_case_package_normalises() -> TestResult {
        let raw: RawOffering = serde_json::from_str(
            r#"{
                "id": 7,
                "category": "Party Package",
                "name": "Birthday",
                "base_price": "1,200,000",
                "max_capacity": 20,
                "status": "MAINTENANCE"
            }"#,
        )?;

        let offering = normalize_offering(raw, VND)?;

        assert_eq!(offering.id().as_str(), "7");
        assert_eq!(offering.kind(), OfferingKind::PartyPackage);
        assert_eq!(offering.pricing_unit(), PricingUnit::PerBooking);
        assert_eq!(offering.base_price(), Money::from_minor(1_200_000, VND));
        assert_eq!(offering.availability(), Availability::Maintenance);

        Ok(())
    }

    #[test]
    fn missing_capacity_is_rejected() -> TestResult {
        let raw: RawOffering =
            serde_json::from_str(r#"{ "id": "r1", "name": "Room", "price": 100 }"#)?;

        assert_eq!(
            normalize_offering(raw, VND).err(),
            Some(NormalizeError::MissingField("capacity"))
        );

        Ok(())
    }

    #[test]
    fn unknown_availability_is_rejected() -> TestResult {
        let raw: RawOffering = serde_json::from_str(
            r#"{ "id": "r1", "name": "Room", "price": 100, "capacity": 4, "status": "haunted" }"#,
        )?;

        assert!(matches!(
            normalize_offering(raw, VND),
            Err(NormalizeError::UnknownVariant {
                field: "availability",
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn offering_sent_with_two_spellings_normalises() -> TestResult {
        let raw: RawOffering = serde_json::from_str(
            r#"{
                "_id": "r1",
                "id": "room-1",
                "name": "Room 1",
                "price": 300000,
                "pricePerHour": 250000,
                "capacity": 6,
                "maxGuests": 8,
                "status": "maintenance",
                "isAvailable": true
            }"#,
        )?;

        let offering = normalize_offering(raw, VND)?;

        assert_eq!(offering.id().as_str(), "room-1");
        assert_eq!(offering.base_price(), Money::from_minor(300_000, VND));
        assert_eq!(offering.capacity(), 6);
        assert_eq!(offering.availability(), Availability::Maintenance);

        Ok(())
    }

    #[test]
    fn availability_flag_is_used_when_no_status_is_sent() -> TestResult {
        let raw: RawOffering = serde_json::from_str(
            r#"{ "id": "r1", "name": "Room", "price": 100, "capacity": 4, "is_available": false }"#,
        )?;

        assert_eq!(
            normalize_offering(raw, VND)?.availability(),
            Availability::Occupied
        );

        Ok(())
    }

    #[test]
    fn add_on_aliases_normalise() -> TestResult {
        let raw: RawAddOn = serde_json::from_str(
            r#"{ "service_id": 3, "serviceName": "Fruit platter", "unitPrice": "150000" }"#,
        )?;

        let add_on = normalize_add_on(raw, VND)?;

        assert_eq!(add_on.id().as_str(), "3");
        assert_eq!(add_on.name(), "Fruit platter");
        assert_eq!(add_on.price(), Money::from_minor(150_000, VND));

        Ok(())
    }
}
