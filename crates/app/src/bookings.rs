//! Server-confirmed bookings and the list they are reconciled into.

use std::fmt;

use encore::{drafts::TimeWindow, ids::TypedId, offerings::OfferingId};
use rusty_money::{Money, iso::Currency};

/// Booking id assigned by the backend
pub type BookingId = TypedId<BookingResult>;

/// Lifecycle status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Awaiting staff confirmation
    Pending,

    /// Confirmed by the venue
    Confirmed,

    /// Cancelled by staff or customer
    Cancelled,

    /// The booked time has passed and been settled
    Completed,
}

impl BookingStatus {
    /// Lowercase status name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking as recorded by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingResult {
    /// Backend id
    pub id: BookingId,

    /// What was booked
    pub offering: OfferingId,

    /// Booked time, when the offering is time based
    pub window: Option<TimeWindow>,

    /// Lifecycle status
    pub status: BookingStatus,

    /// Total charged by the backend
    pub total: Money<'static, Currency>,
}

/// How an upsert changed a [`BookingList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An entry with the same id was replaced in place.
    Replaced,

    /// The booking was new and was put at the front.
    Prepended,
}

/// Bookings owned by a screen, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingList {
    entries: Vec<BookingResult>,
}

impl BookingList {
    /// Create a list from bookings fetched from the backend.
    #[must_use]
    pub fn new(entries: Vec<BookingResult>) -> Self {
        Self { entries }
    }

    /// Replace the booking with the same id, or prepend it.
    pub fn upsert(&mut self, booking: BookingResult) -> Upsert {
        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.id == booking.id) {
            *existing = booking;

            return Upsert::Replaced;
        }

        self.entries.insert(0, booking);

        Upsert::Prepended
    }

    /// Look up a booking by id.
    pub fn get(&self, id: &BookingId) -> Option<&BookingResult> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Bookings, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &BookingResult> {
        self.entries.iter()
    }

    /// Number of bookings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::VND;

    use crate::test::booking;

    use super::*;

    #[test]
    fn new_bookings_are_prepended() {
        let mut list = BookingList::new(vec![booking("b-1", BookingStatus::Confirmed, 100)]);

        assert_eq!(
            list.upsert(booking("b-2", BookingStatus::Pending, 200)),
            Upsert::Prepended
        );

        let ids: Vec<&str> = list.iter().map(|entry| entry.id.as_str()).collect();

        assert_eq!(ids, ["b-2", "b-1"]);
    }

    #[test]
    fn existing_bookings_are_replaced_in_place() {
        let mut list = BookingList::new(vec![
            booking("b-2", BookingStatus::Pending, 200),
            booking("b-1", BookingStatus::Pending, 100),
        ]);

        assert_eq!(
            list.upsert(booking("b-1", BookingStatus::Confirmed, 90)),
            Upsert::Replaced
        );

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.get(&BookingId::new("b-1")).map(|entry| entry.status),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(
            list.iter().last().map(|entry| entry.total),
            Some(Money::from_minor(90, VND))
        );
    }
}
