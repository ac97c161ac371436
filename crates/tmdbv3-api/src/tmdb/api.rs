//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use serde_json::Value;

use super::params::QueryParams;

/// TMDB API trait.
///
/// The single request seam between the search helpers and the HTTP client,
/// so pagination can be exercised against a mock.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Issues a GET against `path` (relative to the API version root)
    /// and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the service answers with
    /// a non-success status, or the body is not valid JSON.
    async fn request(&self, path: &str, params: &QueryParams) -> Result<Value>;
}
