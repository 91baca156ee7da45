//! Backend API Config

use clap::Args;
use rusty_money::{Findable, iso::Currency};

use super::ConfigError;

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the booking backend
    #[arg(long, env = "ENCORE_API_URL", default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "ENCORE_API_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,

    /// ISO 4217 currency every price is quoted in
    #[arg(long, env = "ENCORE_CURRENCY", default_value = "VND")]
    pub currency: String,
}

impl ApiConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for a code rusty-money does not know.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        let code = self.currency.trim().to_ascii_uppercase();

        Currency::find(&code).ok_or(ConfigError::UnknownCurrency(code))
    }

    /// Check the URL scheme and timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}
