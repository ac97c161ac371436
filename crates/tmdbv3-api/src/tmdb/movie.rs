//! Movie accessor and movie lists.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde_json::Value;
use tracing::instrument;

use super::client::TmdbClient;
use super::error::UnknownName;
use super::params::QueryParams;

/// Sub-resources under `movie/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieProperty {
    /// `alternative_titles`
    AlternativeTitles,
    /// `credits`
    Credits,
    /// `images`
    Images,
    /// `keywords`
    Keywords,
    /// `releases`
    Releases,
    /// `trailers`
    Trailers,
    /// `translations`
    Translations,
    /// `similar_movies`
    SimilarMovies,
    /// `reviews`
    Reviews,
    /// `lists`
    Lists,
}

impl MovieProperty {
    /// Every property, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::AlternativeTitles,
        Self::Credits,
        Self::Images,
        Self::Keywords,
        Self::Releases,
        Self::Trailers,
        Self::Translations,
        Self::SimilarMovies,
        Self::Reviews,
        Self::Lists,
    ];

    /// Path segment for this property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlternativeTitles => "alternative_titles",
            Self::Credits => "credits",
            Self::Images => "images",
            Self::Keywords => "keywords",
            Self::Releases => "releases",
            Self::Trailers => "trailers",
            Self::Translations => "translations",
            Self::SimilarMovies => "similar_movies",
            Self::Reviews => "reviews",
            Self::Lists => "lists",
        }
    }
}

impl fmt::Display for MovieProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieProperty {
    type Err = UnknownName;

    /// Accepts the path segment; `-` may stand in for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|property| property.as_str() == normalized)
            .ok_or_else(|| UnknownName::new("movie property", s))
    }
}

/// Movie lists that are not bound to a movie id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    /// `movie/latest` - the most recently added movie.
    Latest,
    /// `movie/upcoming`
    Upcoming,
    /// `movie/now_playing`
    NowPlaying,
    /// `movie/popular`
    Popular,
    /// `movie/top_rated`
    TopRated,
}

impl MovieList {
    /// Every list, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Latest,
        Self::Upcoming,
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
    ];

    /// Resource path of the list.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Latest => "movie/latest",
            Self::Upcoming => "movie/upcoming",
            Self::NowPlaying => "movie/now_playing",
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
        }
    }

    /// List name without the `movie/` prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.path().trim_start_matches("movie/")
    }
}

impl fmt::Display for MovieList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieList {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|list| list.as_str() == normalized)
            .ok_or_else(|| UnknownName::new("movie list", s))
    }
}

/// Accessor for `movie/{id}` and its sub-resources.
///
/// Holds only the id; every method issues a fresh request.
#[derive(Debug, Clone, Copy)]
pub struct Movie<'a> {
    client: &'a TmdbClient,
    id: u64,
}

impl<'a> Movie<'a> {
    pub(crate) const fn new(client: &'a TmdbClient, id: u64) -> Self {
        Self { client, id }
    }

    /// TMDB movie id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Resource path, `movie/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("movie/{}", self.id)
    }

    /// Fetches the primary movie record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(movie_id = self.id))]
    pub async fn info(&self, params: &QueryParams) -> Result<Value> {
        self.client.get_json(&self.path(), params).await
    }

    /// Fetches `movie/{id}/{property}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(movie_id = self.id, property = %property))]
    pub async fn property(&self, property: MovieProperty, params: &QueryParams) -> Result<Value> {
        let path = format!("{}/{property}", self.path());
        self.client.get_json(&path, params).await
    }

    /// Alternative titles.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn alternative_titles(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::AlternativeTitles, params).await
    }

    /// Cast and crew.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn credits(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Credits, params).await
    }

    /// Backdrops and posters.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn images(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Images, params).await
    }

    /// Plot keywords.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn keywords(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Keywords, params).await
    }

    /// Release dates and certifications per country.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn releases(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Releases, params).await
    }

    /// Trailers.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn trailers(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Trailers, params).await
    }

    /// Available translations.
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn translations(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Translations, params).await
    }

    /// Similar movies (paged).
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn similar_movies(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::SimilarMovies, params).await
    }

    /// User reviews (paged).
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn reviews(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Reviews, params).await
    }

    /// Lists the movie belongs to (paged).
    ///
    /// # Errors
    ///
    /// See [`Movie::property`].
    pub async fn lists(&self, params: &QueryParams) -> Result<Value> {
        self.property(MovieProperty::Lists, params).await
    }
}

impl TmdbClient {
    /// Returns an accessor for `movie/{id}`.
    #[must_use]
    pub const fn movie(&self, id: u64) -> Movie<'_> {
        Movie::new(self, id)
    }

    /// Fetches one of the movie lists.
    ///
    /// `page` (1..=1000) and `language` are the usual parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    #[instrument(skip_all, fields(list = %list))]
    pub async fn movie_list(&self, list: MovieList, params: &QueryParams) -> Result<Value> {
        self.get_json(list.path(), params).await
    }

    /// The most recently added movie.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::movie_list`].
    pub async fn latest_movie(&self, params: &QueryParams) -> Result<Value> {
        self.movie_list(MovieList::Latest, params).await
    }

    /// Upcoming movies; refreshed daily, at most 100 items.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::movie_list`].
    pub async fn upcoming_movies(&self, params: &QueryParams) -> Result<Value> {
        self.movie_list(MovieList::Upcoming, params).await
    }

    /// Movies in theatres; refreshed daily, at most 100 items.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::movie_list`].
    pub async fn now_playing_movies(&self, params: &QueryParams) -> Result<Value> {
        self.movie_list(MovieList::NowPlaying, params).await
    }

    /// Popular movies; refreshed daily.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::movie_list`].
    pub async fn popular_movies(&self, params: &QueryParams) -> Result<Value> {
        self.movie_list(MovieList::Popular, params).await
    }

    /// Top rated movies (10 or more votes); refreshed daily.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::movie_list`].
    pub async fn top_rated_movies(&self, params: &QueryParams) -> Result<Value> {
        self.movie_list(MovieList::TopRated, params).await
    }
}
