//! Screen state initialised from the backend.

use encore::catalog::Catalog;
use tracing::info;

use crate::{
    api::{ApiError, BookingApi},
    bookings::BookingList,
};

/// Fetch offerings and add-ons concurrently into a [`Catalog`].
///
/// # Errors
///
/// Returns the first [`ApiError`] from either fetch.
pub async fn load_catalog(api: &dyn BookingApi) -> Result<Catalog<'static>, ApiError> {
    let (offerings, add_ons) = tokio::try_join!(api.fetch_offerings(), api.fetch_add_ons())?;

    info!(
        offerings = offerings.len(),
        add_ons = add_ons.len(),
        "catalog loaded"
    );

    Ok(Catalog::new(offerings, add_ons))
}

/// Fetch the signed-in user's bookings into a [`BookingList`].
///
/// # Errors
///
/// Returns an [`ApiError`] if the fetch fails.
pub async fn load_bookings(api: &dyn BookingApi) -> Result<BookingList, ApiError> {
    let bookings = api.fetch_bookings().await?;

    info!(bookings = bookings.len(), "bookings loaded");

    Ok(BookingList::new(bookings))
}
