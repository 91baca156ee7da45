//! Form input parsing.
//!
//! The composer works on typed values only; raw text from a form is turned
//! into those values here.

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

/// Errors raised while reading a requested time window.
#[derive(Debug, Error)]
pub enum WindowInputError {
    /// A timestamp could not be parsed.
    #[error("invalid date: {0}")]
    Timestamp(#[from] jiff::Error),

    /// Neither an end nor a duration was given.
    #[error("invalid date: give an end time or a number of hours")]
    MissingEnd,

    /// The start plus the duration falls outside the supported calendar.
    #[error("invalid date: {hours} hours from the start is out of range")]
    OutOfRange {
        /// Requested duration
        hours: u32,
    },
}

/// Read a guest count or quantity.
///
/// Anything that is not a whole non-negative number reads as 0, which the
/// composer then reports as a capacity violation.
pub fn parse_quantity(input: &str) -> u32 {
    input.trim().parse().unwrap_or(0)
}

/// Read a requested window from a start and either an end or a duration in
/// hours. Ordering is left to the composer.
///
/// # Errors
///
/// Returns a [`WindowInputError`] if a timestamp is malformed or no end can be
/// derived.
pub fn parse_window(
    start: &str,
    end: Option<&str>,
    hours: Option<u32>,
) -> Result<(Timestamp, Timestamp), WindowInputError> {
    let start: Timestamp = start.trim().parse()?;

    let end = match (end, hours) {
        (Some(end), _) => end.trim().parse()?,
        (None, Some(hours)) => start
            .checked_add(SignedDuration::from_hours(i64::from(hours)))
            .map_err(|_err| WindowInputError::OutOfRange { hours })?,
        (None, None) => return Err(WindowInputError::MissingEnd),
    };

    Ok((start, end))
}
