use std::io;

use clap::Args;
use encore::{composer::BookingComposer, receipt::write_receipt};
use encore_app::lists::load_catalog;
use jiff::Timestamp;

use super::{Backend, draft::DraftArgs};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    draft: DraftArgs,
}

pub(crate) async fn run(backend: &Backend, args: QuoteArgs) -> Result<(), String> {
    let catalog = load_catalog(backend.api.as_ref())
        .await
        .map_err(|error| format!("failed to load offerings: {}", error.user_message()))?;

    let now = Timestamp::now();

    let draft = args
        .draft
        .build(backend.api.as_ref(), &catalog, backend.currency, now)
        .await?;

    let composition = BookingComposer::compose(&draft, now);

    write_receipt(io::stdout().lock(), &draft, &composition)
        .map_err(|error| format!("failed to render quote: {error}"))
}
