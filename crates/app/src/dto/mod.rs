//! Wire DTOs and their normalisation into core types.
//!
//! Responses from the backend are loosely shaped: field names arrive in camel
//! or snake case, ids as strings or numbers, amounts as numbers or strings, and
//! lists bare or wrapped in `data`. Each entity has one `Raw*` struct with an
//! optional field per observed spelling (serde aliases only cover case
//! variants of one name) and one `normalize_*` function that merges the
//! spellings in a fixed precedence and turns them into the typed core shape.
//! Nothing past this module sees a raw field.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

pub mod bookings;
pub mod errors;
pub mod offerings;
pub mod promotions;

pub use bookings::{BookingRequest, RawBooking, normalize_booking};
pub use errors::RawErrorBody;
pub use offerings::{RawAddOn, RawOffering, normalize_add_on, normalize_offering};
pub use promotions::{RawPromotion, normalize_promotion};

/// Errors raised while normalising a response into core types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// A required field was absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// An amount could not be read as a decimal number.
    #[error("invalid amount for {field}: {value}")]
    InvalidAmount {
        /// Field being read
        field: &'static str,

        /// Value as received
        value: String,
    },

    /// An amount that must not be negative was.
    #[error("negative amount for {0}")]
    NegativeAmount(&'static str),

    /// An amount does not fit the currency's minor units.
    #[error("amount out of range for {0}")]
    AmountOutOfRange(&'static str),

    /// An enumerated field had a value outside the known spellings.
    #[error("unknown {field}: {value}")]
    UnknownVariant {
        /// Field being read
        field: &'static str,

        /// Value as received
        value: String,
    },
}

/// A list or object, bare or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{ "data": ... }`
    Wrapped {
        /// Wrapped payload
        data: T,
    },

    /// The payload itself
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// An id sent as a string or a number.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawId {
    /// String id, e.g. a Mongo object id
    Text(String),

    /// Numeric id, e.g. a SQL serial
    Number(u64),
}

impl RawId {
    /// Id as a string.
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// An amount in major units, sent as a number or a string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    /// JSON number
    Number(serde_json::Number),

    /// JSON string holding a number, possibly with thousands separators
    Text(String),
}

impl RawAmount {
    /// Read the amount as a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidAmount`] if the value is not numeric.
    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, NormalizeError> {
        let text = match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().replace([',', '_'], ""),
        };

        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_err| NormalizeError::InvalidAmount {
                field,
                value: text.clone(),
            })
    }

    /// Read the amount as non-negative money in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizeError`] if the value is not numeric, negative, or
    /// out of range.
    pub fn to_money(
        &self,
        field: &'static str,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, NormalizeError> {
        money_from_major(self.to_decimal(field)?, field, currency)
    }
}

/// Convert a major-unit decimal into money, rounding half away from zero to
/// the currency's minor unit.
///
/// # Errors
///
/// Returns a [`NormalizeError`] if the value is negative or out of range.
pub fn money_from_major(
    amount: Decimal,
    field: &'static str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, NormalizeError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(NormalizeError::NegativeAmount(field));
    }

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .ok_or(NormalizeError::AmountOutOfRange(field))?;

    let minor = amount
        .checked_mul(scale)
        .ok_or(NormalizeError::AmountOutOfRange(field))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(NormalizeError::AmountOutOfRange(field))?;

    Ok(Money::from_minor(minor, currency))
}

/// First present value among the spellings of one field, in precedence order.
///
/// Backends send the same field under several names, sometimes more than one
/// at once, so each spelling is its own optional field and merged here.
pub(crate) fn first_present<T, const N: usize>(spellings: [Option<T>; N]) -> Option<T> {
    spellings.into_iter().flatten().next()
}

/// Like [`first_present`], but the field must be present under some spelling.
pub(crate) fn required<T, const N: usize>(
    field: &'static str,
    spellings: [Option<T>; N],
) -> Result<T, NormalizeError> {
    first_present(spellings).ok_or(NormalizeError::MissingField(field))
}

/// Lowercase a loosely spelled enum value and fold separators to `_`.
pub(crate) fn fold_variant(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
