use std::sync::Arc;

use clap::{Parser, Subcommand};
use encore_app::{
    api::{BookingApi, HttpBookingApi},
    config::{ApiConfig, LoggingConfig, SessionConfig},
    observability,
    session::SessionContext,
};
use rusty_money::iso::Currency;

mod book;
mod draft;
mod offerings;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "encore", about = "Encore booking CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    api: ApiConfig,

    #[command(flatten)]
    session: SessionConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List offerings and add-ons
    Offerings(offerings::OfferingsArgs),

    /// Price a booking without submitting it
    Quote(quote::QuoteArgs),

    /// Price and submit a booking
    Book(book::BookArgs),
}

/// Everything a subcommand needs to talk to the backend.
pub(crate) struct Backend {
    pub(crate) api: Arc<dyn BookingApi>,
    pub(crate) session: SessionContext,
    pub(crate) currency: &'static Currency,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let backend = connect(&self.api, self.session)?;

        match self.command {
            Commands::Offerings(args) => offerings::run(&backend, args).await,
            Commands::Quote(args) => quote::run(&backend, args).await,
            Commands::Book(args) => book::run(&backend, args).await,
        }
    }
}

fn connect(config: &ApiConfig, session: SessionConfig) -> Result<Backend, String> {
    config
        .validate()
        .map_err(|error| format!("invalid API configuration: {error}"))?;

    let currency = config
        .currency()
        .map_err(|error| format!("invalid API configuration: {error}"))?;

    let session = session
        .into_session()
        .map_err(|error| format!("invalid session: {error}"))?;

    let api = HttpBookingApi::new(config, session.clone(), currency)
        .map_err(|error| format!("failed to build HTTP client: {error}"))?;

    Ok(Backend {
        api: Arc::new(api),
        session,
        currency,
    })
}
