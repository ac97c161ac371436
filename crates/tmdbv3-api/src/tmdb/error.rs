//! Error types surfaced by the TMDB client.

use reqwest::StatusCode;
use thiserror::Error;

/// The TMDB service answered with a non-success HTTP status.
///
/// Returned inside an `anyhow::Error`; recover it with
/// `err.downcast_ref::<RequestFailed>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("TMDB request failed (HTTP {status}): {path}: {detail}")]
pub struct RequestFailed {
    /// HTTP status returned by the service.
    pub status: StatusCode,
    /// Resource path that was requested.
    pub path: String,
    /// `status_message` from the error body, or the raw body text.
    pub detail: String,
}

impl RequestFailed {
    /// Creates a new `RequestFailed`.
    #[must_use]
    pub fn new(status: StatusCode, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// A name did not match any known movie list, property or search kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownName {
    /// What was being parsed (e.g. `movie property`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: String::from(value),
        }
    }
}
