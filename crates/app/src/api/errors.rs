//! Booking API errors.

use std::fmt;

use thiserror::Error;

use crate::dto::{NormalizeError, RawErrorBody};

/// Error codes the backend sends when a promotion has no redemptions left.
const PROMOTION_EXHAUSTED_CODES: [&str; 3] = [
    "PROMOTION_EXHAUSTED",
    "PROMO_EXHAUSTED",
    "PROMOTION_USAGE_LIMIT_REACHED",
];

/// Why the backend refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The request failed server-side validation.
    Validation,

    /// The slot is no longer free.
    Conflict,

    /// The promotion code ran out of redemptions.
    PromotionExhausted,

    /// The session is missing, expired or lacks permission.
    Unauthorized,

    /// Not found or any other refusal.
    Other,
}

impl RejectionKind {
    /// Classify a non-2xx response by status code and structured error code.
    pub fn classify(status: u16, code: Option<&str>) -> Self {
        if code.is_some_and(|code| {
            PROMOTION_EXHAUSTED_CODES
                .iter()
                .any(|known| code.eq_ignore_ascii_case(known))
        }) {
            return Self::PromotionExhausted;
        }

        match status {
            401 | 403 => Self::Unauthorized,
            409 => Self::Conflict,
            400 | 422 => Self::Validation,
            _ => Self::Other,
        }
    }
}

/// A completed request that the backend refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRejection {
    kind: RejectionKind,
    status: u16,
    message: Option<String>,
    field_errors: Vec<(String, String)>,
}

impl ServerRejection {
    /// Create a rejection with no body details.
    pub fn new(kind: RejectionKind, status: u16) -> Self {
        Self {
            kind,
            status,
            message: None,
            field_errors: Vec::new(),
        }
    }

    /// Build a rejection from a response status and its error body.
    pub fn from_response(status: u16, body: &RawErrorBody) -> Self {
        Self {
            kind: RejectionKind::classify(status, body.code.as_deref()),
            status,
            message: body
                .message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string),
            field_errors: body.field_errors(),
        }
    }

    /// Classification
    pub fn kind(&self) -> RejectionKind {
        self.kind
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Backend message, when one was sent
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Per-field messages, sorted by field
    pub fn field_errors(&self) -> &[(String, String)] {
        &self.field_errors
    }

    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self.kind {
            RejectionKind::Validation if !self.field_errors.is_empty() => self
                .field_errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; "),
            RejectionKind::Validation => self
                .message
                .clone()
                .unwrap_or_else(|| "the booking details were rejected".to_string()),
            RejectionKind::Conflict => {
                "this slot is no longer available; pick another time".to_string()
            }
            RejectionKind::PromotionExhausted => {
                "this promotion code has been fully redeemed".to_string()
            }
            RejectionKind::Unauthorized => {
                "your session has expired or lacks permission; sign in again".to_string()
            }
            RejectionKind::Other => self
                .message
                .clone()
                .unwrap_or_else(|| "the server refused the request".to_string()),
        }
    }
}

impl fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_message(), self.status)
    }
}

/// Errors returned by a [`BookingApi`](crate::api::BookingApi).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete: connect failure, timeout, broken body.
    #[error("cannot reach server")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("unexpected response from server")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but could not be normalised.
    #[error("unexpected response from server")]
    Normalize(#[from] NormalizeError),

    /// The backend refused the request.
    #[error("request rejected: {0}")]
    Rejected(ServerRejection),
}

impl ApiError {
    /// Whether the request failed before the backend could answer.
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(error) if error.is_timeout() => {
                "cannot reach server: the request timed out".to_string()
            }
            Self::Transport(_) => "cannot reach server".to_string(),
            Self::Decode(_) | Self::Normalize(_) => {
                "the server sent a response we could not read".to_string()
            }
            Self::Rejected(rejection) => rejection.user_message(),
        }
    }
}

impl From<ServerRejection> for ApiError {
    fn from(rejection: ServerRejection) -> Self {
        Self::Rejected(rejection)
    }
}
