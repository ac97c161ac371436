//! Review accessor.

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::client::TmdbClient;
use super::params::QueryParams;

/// Accessor for `review/{id}`.
///
/// Review ids are opaque strings (e.g. `5488c29bc3a3686f4a00004a`).
#[derive(Debug, Clone)]
pub struct Review<'a> {
    client: &'a TmdbClient,
    id: String,
}

impl<'a> Review<'a> {
    pub(crate) const fn new(client: &'a TmdbClient, id: String) -> Self {
        Self { client, id }
    }

    /// TMDB review id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resource path, `review/{id}`, with the id percent-encoded as a
    /// single path segment.
    #[must_use]
    pub fn path(&self) -> String {
        format!("review/{}", urlencoding::encode(&self.id))
    }

    /// Fetches the review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(review_id = %self.id))]
    pub async fn info(&self, params: &QueryParams) -> Result<Value> {
        self.client.get_json(&self.path(), params).await
    }
}

impl TmdbClient {
    /// Returns an accessor for `review/{id}`.
    #[must_use]
    pub fn review(&self, id: impl Into<String>) -> Review<'_> {
        Review::new(self, id.into())
    }
}
