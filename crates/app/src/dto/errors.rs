//! Error response bodies.

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Error body returned with a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawErrorBody {
    #[serde(default, alias = "error", alias = "msg")]
    pub message: Option<String>,

    #[serde(default, alias = "errorCode", alias = "error_code")]
    pub code: Option<String>,

    #[serde(default, alias = "fieldErrors", alias = "field_errors")]
    pub errors: FxHashMap<String, String>,
}

impl RawErrorBody {
    /// Parse a response body, falling back to an empty body for anything that
    /// is not a JSON error object.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Per-field messages sorted by field name.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let mut errors: Vec<(String, String)> = self
            .errors
            .iter()
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect();

        errors.sort();

        errors
    }
}
