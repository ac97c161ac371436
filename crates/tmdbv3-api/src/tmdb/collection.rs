//! Collection accessor.

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::client::TmdbClient;
use super::params::QueryParams;

/// Accessor for `collection/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    client: &'a TmdbClient,
    id: u64,
}

impl<'a> Collection<'a> {
    pub(crate) const fn new(client: &'a TmdbClient, id: u64) -> Self {
        Self { client, id }
    }

    /// TMDB collection id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Resource path, `collection/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("collection/{}", self.id)
    }

    /// Fetches the collection record with its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(collection_id = self.id))]
    pub async fn info(&self, params: &QueryParams) -> Result<Value> {
        self.client.get_json(&self.path(), params).await
    }

    /// Fetches `collection/{id}/images`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(collection_id = self.id))]
    pub async fn images(&self, params: &QueryParams) -> Result<Value> {
        let path = format!("{}/images", self.path());
        self.client.get_json(&path, params).await
    }
}

impl TmdbClient {
    /// Returns an accessor for `collection/{id}`.
    #[must_use]
    pub const fn collection(&self, id: u64) -> Collection<'_> {
        Collection::new(self, id)
    }
}
