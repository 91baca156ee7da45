//! Booking API: the backend collaborators the coordinator depends on.

use async_trait::async_trait;
use encore::{add_ons::AddOn, offerings::Offering, promotions::PromotionCode};
use jiff::Timestamp;
use mockall::automock;
use rusty_money::{Money, iso::Currency};

use crate::{bookings::BookingResult, dto::BookingRequest};

mod errors;
mod http;

pub use errors::{ApiError, RejectionKind, ServerRejection};
pub use http::HttpBookingApi;

/// Backend calls made while composing and submitting bookings.
#[automock]
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Retrieves every offering with its current availability.
    async fn fetch_offerings(&self) -> Result<Vec<Offering<'static>>, ApiError>;

    /// Retrieves every add-on.
    async fn fetch_add_ons(&self) -> Result<Vec<AddOn<'static>>, ApiError>;

    /// Retrieves the signed-in user's bookings, newest first.
    async fn fetch_bookings(&self) -> Result<Vec<BookingResult>, ApiError>;

    /// Looks up a promotion code for `subtotal` at `when`.
    ///
    /// Returns `None` when the backend does not know the code.
    async fn validate_promotion(
        &self,
        code: &str,
        subtotal: Money<'static, Currency>,
        when: Timestamp,
    ) -> Result<Option<PromotionCode<'static>>, ApiError>;

    /// Submits a booking.
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResult, ApiError>;
}
