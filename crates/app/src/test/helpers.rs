//! Test Helpers

use encore::{
    drafts::{BookingDraft, DraftError, TimeWindow},
    offerings::{Offering, OfferingId, OfferingKind},
};
use jiff::{SignedDuration, Timestamp};
use rusty_money::{Money, iso::VND};

use crate::{
    bookings::{BookingId, BookingResult, BookingStatus},
    session::{Role, SessionContext, UserId},
};

/// 2026-11-01T12:00:00Z
pub(crate) const NOW: Timestamp = Timestamp::constant(1_793_534_400, 0);

pub(crate) fn booking(id: &str, status: BookingStatus, total: i64) -> BookingResult {
    BookingResult {
        id: BookingId::new(id),
        offering: OfferingId::new("room-1"),
        window: None,
        status,
        total: Money::from_minor(total, VND),
    }
}

/// Room 1: 250,000 VND an hour for up to 8 guests.
pub(crate) fn room() -> Offering<'static> {
    Offering::new(
        OfferingId::new("room-1"),
        OfferingKind::Room,
        "Room 1",
        Money::from_minor(250_000, VND),
        8,
    )
}

/// Four guests in [`room`] from 19:00 to 21:00 tonight.
pub(crate) fn draft_for_tonight() -> Result<BookingDraft<'static>, DraftError> {
    let start = NOW + SignedDuration::from_hours(7);
    let mut draft = BookingDraft::new(VND);

    draft.select_offering(room())?;
    draft.set_quantity(4);
    draft.set_window(TimeWindow::new(start, start + SignedDuration::from_hours(2)));

    Ok(draft)
}

pub(crate) fn session(role: Role) -> SessionContext {
    SessionContext::new(
        UserId::new("u-1"),
        "Test User",
        role,
        "test-token".to_string(),
    )
}
