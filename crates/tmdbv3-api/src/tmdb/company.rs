//! Company accessor.

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::client::TmdbClient;
use super::params::QueryParams;

/// Accessor for `company/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct Company<'a> {
    client: &'a TmdbClient,
    id: u64,
}

impl<'a> Company<'a> {
    pub(crate) const fn new(client: &'a TmdbClient, id: u64) -> Self {
        Self { client, id }
    }

    /// TMDB company id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Resource path, `company/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("company/{}", self.id)
    }

    /// Fetches the company record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(company_id = self.id))]
    pub async fn info(&self, params: &QueryParams) -> Result<Value> {
        self.client.get_json(&self.path(), params).await
    }

    /// Fetches `company/{id}/movies` (paged).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(company_id = self.id))]
    pub async fn movies(&self, params: &QueryParams) -> Result<Value> {
        let path = format!("{}/movies", self.path());
        self.client.get_json(&path, params).await
    }
}

impl TmdbClient {
    /// Returns an accessor for `company/{id}`.
    #[must_use]
    pub const fn company(&self, id: u64) -> Company<'_> {
        Company::new(self, id)
    }
}
