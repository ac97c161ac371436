//! Client library for The Movie Database (TMDB) API v3.
//!
//! Provides a `TmdbClient` that attaches the API key to every request,
//! accessor objects for movies, collections, companies, people and reviews,
//! and search helpers including exhaustive multi-page movie search.

/// TMDB API client.
pub mod tmdb;
