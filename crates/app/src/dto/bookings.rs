//! Booking DTOs.

use encore::{
    drafts::{BookingDraft, TimeWindow},
    offerings::{OfferingId, OfferingKind},
    pricing::PromotionOutcome,
};
use jiff::Timestamp;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    bookings::{BookingId, BookingResult, BookingStatus},
    dto::{NormalizeError, RawAmount, RawId, first_present, fold_variant, required},
};

/// Booking as returned by `GET /bookings` and `POST /bookings`.
///
/// Every spelling is read independently; see [`normalize_booking`] for which
/// one wins when several are sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    pub id: Option<RawId>,

    #[serde(rename = "_id")]
    pub object_id: Option<RawId>,

    #[serde(alias = "booking_id")]
    pub booking_id: Option<RawId>,

    #[serde(alias = "offering_id")]
    pub offering_id: Option<RawId>,

    #[serde(alias = "room_id")]
    pub room_id: Option<RawId>,

    #[serde(alias = "package_id")]
    pub package_id: Option<RawId>,

    pub start: Option<Timestamp>,

    #[serde(alias = "start_time")]
    pub start_time: Option<Timestamp>,

    pub end: Option<Timestamp>,

    #[serde(alias = "end_time")]
    pub end_time: Option<Timestamp>,

    pub status: Option<String>,

    pub state: Option<String>,

    pub total: Option<RawAmount>,

    #[serde(alias = "total_price")]
    pub total_price: Option<RawAmount>,

    #[serde(alias = "total_amount")]
    pub total_amount: Option<RawAmount>,
}

/// Body of `POST /bookings`.
///
/// Field renaming only: the backend recomputes prices and decides acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Client-generated key so a retried request is not booked twice
    pub idempotency_key: Uuid,

    /// Offering being booked
    pub offering_id: String,

    /// Offering kind, e.g. `room`
    pub kind: &'static str,

    /// Guest count or quantity
    pub quantity: u32,

    /// Requested start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,

    /// Requested end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,

    /// Attached add-ons
    pub add_on_ids: Vec<String>,

    /// Promotion code, sent only when it was honoured locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,

    /// Free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BookingRequest {
    /// Serialise `draft` for submission.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MissingField`] if no offering is selected.
    pub fn from_draft(
        draft: &BookingDraft<'_>,
        promotion: &PromotionOutcome<'_>,
        idempotency_key: Uuid,
    ) -> Result<Self, NormalizeError> {
        let offering = draft
            .offering()
            .ok_or(NormalizeError::MissingField("offering"))?;

        let promotion_code = match promotion {
            PromotionOutcome::Applied { code, .. } => Some(code.clone()),
            PromotionOutcome::None | PromotionOutcome::NotApplicable { .. } => None,
        };

        Ok(Self {
            idempotency_key,
            offering_id: offering.id().as_str().to_string(),
            kind: wire_kind(offering.kind()),
            quantity: draft.quantity(),
            start_time: draft.window().map(|window| window.start()),
            end_time: draft.window().map(|window| window.end()),
            add_on_ids: draft
                .add_ons()
                .iter()
                .map(|add_on| add_on.id().as_str().to_string())
                .collect(),
            promotion_code,
            note: draft.note().map(str::to_string),
        })
    }
}

/// Normalise a booking priced in `currency`.
///
/// When a field arrives under several spellings: `id` over `_id` over
/// `bookingId`, `offeringId` over `roomId` over `packageId`, `start`/`end`
/// over `startTime`/`endTime`, `status` over `state`, `total` over
/// `totalPrice` over `totalAmount`.
///
/// A missing status is read as pending. A window is kept only when both bounds
/// are present.
///
/// # Errors
///
/// Returns a [`NormalizeError`] for a missing id, offering or total, an
/// unknown status or an unreadable total.
pub fn normalize_booking(
    raw: RawBooking,
    currency: &'static Currency,
) -> Result<BookingResult, NormalizeError> {
    let id = required("id", [raw.id, raw.object_id, raw.booking_id])?;
    let offering = required("offering", [raw.offering_id, raw.room_id, raw.package_id])?;
    let total = required("total", [raw.total, raw.total_price, raw.total_amount])?;

    let status = first_present([raw.status, raw.state])
        .as_deref()
        .map_or(Ok(BookingStatus::Pending), parse_status)?;

    let window = match (
        first_present([raw.start, raw.start_time]),
        first_present([raw.end, raw.end_time]),
    ) {
        (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
        _ => None,
    };

    Ok(BookingResult {
        id: BookingId::new(id.into_string()),
        offering: OfferingId::new(offering.into_string()),
        window,
        status,
        total: total.to_money("total", currency)?,
    })
}

fn wire_kind(kind: OfferingKind) -> &'static str {
    match kind {
        OfferingKind::Room => "room",
        OfferingKind::PartyPackage => "party_package",
        OfferingKind::MenuItem => "menu_item",
    }
}

fn parse_status(value: &str) -> Result<BookingStatus, NormalizeError> {
    match fold_variant(value).as_str() {
        "pending" | "new" | "waiting" => Ok(BookingStatus::Pending),
        "confirmed" | "accepted" | "approved" => Ok(BookingStatus::Confirmed),
        "cancelled" | "canceled" | "rejected" => Ok(BookingStatus::Cancelled),
        "completed" | "done" | "finished" | "checked_out" => Ok(BookingStatus::Completed),
        _ => Err(NormalizeError::UnknownVariant {
            field: "status",
            value: value.to_string(),
        }),
    }
}
