//! Person accessor and person lists.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::client::TmdbClient;
use super::error::UnknownName;
use super::params::QueryParams;

/// Sub-resources under `person/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonProperty {
    /// `movie_credits`
    MovieCredits,
    /// `external_ids`
    ExternalIds,
    /// `images`
    Images,
}

impl PersonProperty {
    /// Every property, in declaration order.
    pub const ALL: [Self; 3] = [Self::MovieCredits, Self::ExternalIds, Self::Images];

    /// Path segment for this property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MovieCredits => "movie_credits",
            Self::ExternalIds => "external_ids",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for PersonProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonProperty {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|property| property.as_str() == normalized)
            .ok_or_else(|| UnknownName::new("person property", s))
    }
}

/// Accessor for `person/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct Person<'a> {
    client: &'a TmdbClient,
    id: u64,
}

impl<'a> Person<'a> {
    pub(crate) const fn new(client: &'a TmdbClient, id: u64) -> Self {
        Self { client, id }
    }

    /// TMDB person id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Resource path, `person/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("person/{}", self.id)
    }

    /// Fetches the person record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(person_id = self.id))]
    pub async fn info(&self, params: &QueryParams) -> Result<Value> {
        self.client.get_json(&self.path(), params).await
    }

    /// Fetches `person/{id}/{property}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(person_id = self.id, property = %property))]
    pub async fn property(&self, property: PersonProperty, params: &QueryParams) -> Result<Value> {
        let path = format!("{}/{property}", self.path());
        self.client.get_json(&path, params).await
    }

    /// Movie cast and crew credits.
    ///
    /// # Errors
    ///
    /// See [`Person::property`].
    pub async fn movie_credits(&self, params: &QueryParams) -> Result<Value> {
        self.property(PersonProperty::MovieCredits, params).await
    }

    /// IMDb, Freebase and TVRage ids.
    ///
    /// # Errors
    ///
    /// See [`Person::property`].
    pub async fn external_ids(&self, params: &QueryParams) -> Result<Value> {
        self.property(PersonProperty::ExternalIds, params).await
    }

    /// Profile images.
    ///
    /// # Errors
    ///
    /// See [`Person::property`].
    pub async fn images(&self, params: &QueryParams) -> Result<Value> {
        self.property(PersonProperty::Images, params).await
    }
}

impl TmdbClient {
    /// Returns an accessor for `person/{id}`.
    #[must_use]
    pub const fn person(&self, id: u64) -> Person<'_> {
        Person::new(self, id)
    }

    /// Fetches `person/popular` (paged).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all)]
    pub async fn popular_people(&self, params: &QueryParams) -> Result<Value> {
        self.get_json("person/popular", params).await
    }

    /// Fetches `person/latest`, the most recently added person.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all)]
    pub async fn latest_person(&self, params: &QueryParams) -> Result<Value> {
        self.get_json("person/latest", params).await
    }
}
