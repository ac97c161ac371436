//! Search helpers for `search/movie`, `search/collection` and `search/person`.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::error::UnknownName;
use super::params::QueryParams;
use super::types::Page;

/// Highest page number TMDB will serve.
pub const MAX_PAGES: u32 = 1_000;

/// Searchable resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// `search/movie`
    Movie,
    /// `search/collection`
    Collection,
    /// `search/person`
    Person,
}

impl SearchKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Movie, Self::Collection, Self::Person];

    /// Resource path of the search endpoint.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Movie => "search/movie",
            Self::Collection => "search/collection",
            Self::Person => "search/person",
        }
    }

    /// Kind name without the `search/` prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.path().trim_start_matches("search/")
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownName::new("search kind", s))
    }
}

/// Pulls the `results` array out of a search response.
fn take_results(body: Value, path: &str) -> Result<Vec<Value>> {
    let Value::Object(mut map) = body else {
        bail!("unexpected non-object response: {path}");
    };
    match map.remove("results") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => bail!("`results` is not an array: {path}"),
        None => bail!("response has no `results`: {path}"),
    }
}

/// Runs a single search request and returns the `results` of that page.
///
/// `query` overrides any `query` already present in `params`.
///
/// # Errors
///
/// Returns an error if the request fails or the response has no `results` array.
#[instrument(skip_all, fields(kind = %kind))]
pub async fn search(
    api: &(impl LocalTmdbApi + Sync),
    kind: SearchKind,
    query: &str,
    params: &QueryParams,
) -> Result<Vec<Value>> {
    let path = kind.path();
    let search_params = params.clone().param("query", query);

    tracing::debug!(query, page = ?search_params.get("page"), "search request");

    let body = api.request(path, &search_params).await?;
    let results = take_results(body, path)?;

    tracing::debug!(fetched = results.len(), "search completed");
    Ok(results)
}

/// Searches movies; one page of results.
///
/// Optional parameters: `page`, `language`, `include_adult`, `year`,
/// `primary_release_year`.
///
/// # Errors
///
/// See [`search`].
pub async fn search_movie(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    params: &QueryParams,
) -> Result<Vec<Value>> {
    search(api, SearchKind::Movie, query, params).await
}

/// Searches collections; one page of results.
///
/// Optional parameters: `page`, `language`.
///
/// # Errors
///
/// See [`search`].
pub async fn search_collection(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    params: &QueryParams,
) -> Result<Vec<Value>> {
    search(api, SearchKind::Collection, query, params).await
}

/// Searches people; one page of results.
///
/// Optional parameters: `page`, `include_adult`.
///
/// # Errors
///
/// See [`search`].
pub async fn search_person(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    params: &QueryParams,
) -> Result<Vec<Value>> {
    search(api, SearchKind::Person, query, params).await
}

/// Searches movies across every result page.
///
/// Requests page 1, 2, ... and concatenates each page's `results` in page
/// order until the reported `total_pages` is reached. Any `page` in
/// `params` is ignored.
///
/// Returns early (with the pages gathered so far) in two cases:
///
/// - A page has no results. TMDB overcounts `total_pages` for some
///   queries, and every later page is empty too.
/// - [`MAX_PAGES`] pages were fetched; TMDB serves nothing beyond that.
///   A `warn!` is emitted.
///
/// Exhaustive: use with specific titles, a broad query can mean hundreds
/// of requests.
///
/// # Errors
///
/// - A page request fails.
/// - A page is malformed.
/// - A page reports a different page number than the one requested.
///
/// Results gathered before the failure are discarded.
#[instrument(skip_all)]
pub async fn search_movie_all(
    api: &(impl LocalTmdbApi + Sync),
    query: &str,
    params: &QueryParams,
) -> Result<Vec<Value>> {
    let path = SearchKind::Movie.path();
    let mut all_results: Vec<Value> = Vec::new();
    let mut page: u32 = 0;

    loop {
        page = page.checked_add(1).context("page counter overflow")?;
        let page_params = params.clone().param("query", query).page(page);

        tracing::debug!(page = page, query, "search/movie page request");

        let body = api
            .request(path, &page_params)
            .await
            .with_context(|| format!("search/movie failed on page {page}"))?;
        let response: Page = serde_json::from_value(body)
            .with_context(|| format!("malformed search/movie page {page}"))?;

        if response.page != page {
            tracing::warn!(
                requested = page,
                reported = response.page,
                "page number mismatch"
            );
            bail!(
                "search/movie page {page} answered as page {}",
                response.page
            );
        }

        let fetched = response.results.len();
        all_results.extend(response.results);

        tracing::debug!(
            page = page,
            fetched = fetched,
            total_pages = response.total_pages,
            "search/movie page completed"
        );

        if fetched == 0 || page >= response.total_pages {
            break;
        }
        if page >= MAX_PAGES {
            tracing::warn!(
                total_pages = response.total_pages,
                "page limit reached, stopping pagination"
            );
            break;
        }
    }

    tracing::info!(
        total = all_results.len(),
        pages = page,
        "search/movie pagination completed"
    );

    Ok(all_results)
}
