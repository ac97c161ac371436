//! TMDB API client module.
//!
//! Builds request URLs against the TMDB API v3, attaches the API key,
//! and returns decoded JSON bodies for movies, collections, companies,
//! people, reviews and searches.

mod api;
mod client;
mod collection;
mod company;
mod error;
mod movie;
mod params;
mod person;
mod review;
mod search;
mod types;

#[cfg(test)]
mod test_util;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use collection::Collection;
pub use company::Company;
pub use error::{RequestFailed, UnknownName};
pub use movie::{Movie, MovieList, MovieProperty};
pub use params::QueryParams;
pub use person::{Person, PersonProperty};
pub use review::Review;
pub use search::{
    MAX_PAGES, SearchKind, search, search_collection, search_movie, search_movie_all,
    search_person,
};
#[allow(clippy::module_name_repetitions)]
pub use types::{Page, TmdbErrorResponse};
