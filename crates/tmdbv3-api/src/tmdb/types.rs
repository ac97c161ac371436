//! TMDB API response types.

use serde::Deserialize;
use serde_json::Value;

/// A paged response (`search/*`, `movie/popular`, ...).
///
/// Items are kept as raw JSON; their shape is owned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Current page number (1-based).
    pub page: u32,
    /// Items on this page.
    pub results: Vec<Value>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// Error body returned by TMDB alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbErrorResponse {
    /// TMDB internal status code (not the HTTP status).
    pub status_code: u32,
    /// Human-readable message.
    pub status_message: String,
    /// Always `false` on errors.
    #[serde(default)]
    pub success: bool,
}
