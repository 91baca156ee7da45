use std::{io, sync::Arc};

use clap::Args;
use encore::{composer::BookingComposer, receipt::write_receipt};
use encore_app::{
    coordinator::{SubmissionCoordinator, SubmissionOutcome},
    lists::{load_bookings, load_catalog},
};
use jiff::Timestamp;

use super::{Backend, draft::DraftArgs};

#[derive(Debug, Args)]
pub(crate) struct BookArgs {
    #[command(flatten)]
    draft: DraftArgs,
}

pub(crate) async fn run(backend: &Backend, args: BookArgs) -> Result<(), String> {
    let api = backend.api.as_ref();

    let (catalog, bookings) = tokio::try_join!(load_catalog(api), load_bookings(api))
        .map_err(|error| format!("failed to load booking data: {}", error.user_message()))?;

    let now = Timestamp::now();

    let draft = args
        .draft
        .build(api, &catalog, backend.currency, now)
        .await?;

    write_receipt(
        io::stdout().lock(),
        &draft,
        &BookingComposer::compose(&draft, now),
    )
    .map_err(|error| format!("failed to render quote: {error}"))?;

    let coordinator =
        SubmissionCoordinator::new(Arc::clone(&backend.api), &backend.session, bookings);

    let booking = match coordinator.submit(&draft, now).await {
        Ok(SubmissionOutcome::Confirmed(booking) | SubmissionOutcome::Discarded(booking)) => {
            booking
        }
        Err(error) => return Err(format!("booking failed: {}", error.user_message())),
    };

    println!("booking_id: {}", booking.id);
    println!("status: {}", booking.status);
    println!("total: {}", booking.total);
    println!("bookings on file: {}", coordinator.bookings().len());

    Ok(())
}
