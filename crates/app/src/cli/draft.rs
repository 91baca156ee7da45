use clap::Args;
use encore::{
    add_ons::AddOnId,
    catalog::Catalog,
    drafts::{BookingDraft, TimeWindow},
    offerings::OfferingId,
    pricing,
};
use encore_app::{
    api::BookingApi,
    forms::{parse_quantity, parse_window},
};
use jiff::Timestamp;
use rusty_money::iso::Currency;
use tracing::warn;

/// Draft fields shared by `quote` and `book`.
#[derive(Debug, Args)]
pub(crate) struct DraftArgs {
    /// Offering id to book
    #[arg(long)]
    offering: String,

    /// Guest count, or quantity for menu items
    #[arg(long, default_value = "1")]
    guests: String,

    /// Requested start, RFC 3339 (e.g. 2026-11-01T19:00:00+07:00)
    #[arg(long)]
    start: Option<String>,

    /// Requested end, RFC 3339
    #[arg(long, requires = "start", conflicts_with = "hours")]
    end: Option<String>,

    /// Requested duration in hours, instead of an end
    #[arg(long, requires = "start")]
    hours: Option<u32>,

    /// Add-on id to attach; repeat for more
    #[arg(long = "add-on")]
    add_ons: Vec<String>,

    /// Promotion code
    #[arg(long)]
    promo: Option<String>,

    /// Note for the venue
    #[arg(long)]
    note: Option<String>,
}

impl DraftArgs {
    /// Build a draft from the arguments, validating any promotion code with
    /// the backend against the draft's subtotal.
    pub(crate) async fn build(
        &self,
        api: &dyn BookingApi,
        catalog: &Catalog<'static>,
        currency: &'static Currency,
        now: Timestamp,
    ) -> Result<BookingDraft<'static>, String> {
        let mut draft = BookingDraft::new(currency);

        let offering = catalog
            .offering(&OfferingId::new(self.offering.as_str()))
            .ok_or_else(|| format!("unknown offering: {}", self.offering))?;

        draft
            .select_offering(offering.clone())
            .map_err(|error| error.to_string())?;

        draft.set_quantity(parse_quantity(&self.guests));

        if let Some(start) = &self.start {
            let (start, end) = parse_window(start, self.end.as_deref(), self.hours)
                .map_err(|error| error.to_string())?;

            draft.set_window(TimeWindow::new(start, end));
        }

        for id in &self.add_ons {
            let add_on = catalog
                .add_on(&AddOnId::new(id.as_str()))
                .ok_or_else(|| format!("unknown add-on: {id}"))?;

            draft
                .add_add_on(add_on.clone())
                .map_err(|error| error.to_string())?;
        }

        draft.set_note(self.note.clone());

        if let Some(code) = self.promo.as_deref().map(str::trim).filter(|code| !code.is_empty()) {
            let subtotal = pricing::subtotal(&draft)
                .map_err(|error| format!("cannot price booking: {error}"))?;

            let promotion = api
                .validate_promotion(code, subtotal, now)
                .await
                .map_err(|error| format!("failed to check promotion code: {}", error.user_message()))?;

            match promotion {
                Some(promotion) => {
                    draft
                        .apply_promotion(promotion)
                        .map_err(|error| error.to_string())?;
                }
                None => {
                    warn!(code, "promotion code not recognised; quoting without it");
                }
            }
        }

        Ok(draft)
    }
}
