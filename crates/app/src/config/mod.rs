//! Client configuration
//!
//! Every setting can come from a CLI flag, an environment variable or a `.env`
//! file, in that order of precedence.

use thiserror::Error;

mod api;
mod logging;
mod session;

pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Errors raised while turning configuration into runtime values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// The API token is empty.
    #[error("API token cannot be empty")]
    EmptyToken,

    /// The API base URL is not an http(s) URL.
    #[error("API base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),

    /// The timeout is zero.
    #[error("API timeout must be at least one second")]
    ZeroTimeout,
}

/// Load `.env` into the process environment if present.
pub fn load_dotenv() {
    // A missing .env file is fine.
    _ = dotenvy::dotenv();
}
