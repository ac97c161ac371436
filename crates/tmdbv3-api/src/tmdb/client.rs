//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::RequestFailed;
use super::params::QueryParams;
use super::types::TmdbErrorResponse;

/// Default API host.
const DEFAULT_API_URI: &str = "https://api.themoviedb.org";

/// Default API version.
const DEFAULT_VERSION: u32 = 3;

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("tmdbv3/", env!("CARGO_PKG_VERSION"));

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// TMDB API client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Version root, e.g. `https://api.themoviedb.org/3/`.
    base_url: Url,
    /// API key appended to every request.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    api_key: Option<String>,
    api_uri: Option<String>,
    version: Option<u32>,
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            api_key: None,
            api_uri: None,
            version: None,
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API host (default: `https://api.themoviedb.org`).
    #[must_use]
    pub fn api_uri(mut self, uri: impl Into<String>) -> Self {
        self.api_uri = Some(uri.into());
        self
    }

    /// Sets the API version (default: 3).
    #[must_use]
    pub const fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Overrides the full version root (for wiremock in tests).
    ///
    /// Takes precedence over `api_uri` and `version`.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `tmdbv3/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - The API URI cannot be parsed.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .context("api_key is required")?;

        let base_url = if let Some(url) = self.base_url {
            with_trailing_slash(url)
        } else {
            let api_uri = self.api_uri.as_deref().unwrap_or(DEFAULT_API_URI);
            let version = self.version.unwrap_or(DEFAULT_VERSION);
            let raw = format!("{}/{version}/", api_uri.trim_end_matches('/'));
            Url::parse(&raw).with_context(|| format!("invalid API URI: {api_uri}"))?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

/// Appends `/` to the URL path so relative joins land below it.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// `.` or `..`, literal or percent-encoded; `Url::join` resolves both.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Copies `url` with the API key value masked, for logging.
fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == API_KEY_PARAM {
                String::from("***")
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Creates a client for the public TMDB v3 API.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is blank or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Version root all resource paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full request URL for `path`.
    ///
    /// `path` is a resource path below the version root whose segments
    /// are already percent-encoded. Caller parameters are appended in
    /// order, followed by `api_key`. A caller-supplied `api_key` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` carries a query or fragment, contains a
    /// `.` or `..` segment, or cannot be joined onto the base URL.
    pub fn request_url(&self, path: &str, params: &QueryParams) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        if relative.contains(['?', '#']) || relative.split('/').any(is_dot_segment) {
            bail!("invalid resource path: {path}");
        }
        let mut url = self
            .base_url
            .join(relative)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params.iter().filter(|(name, _)| *name != API_KEY_PARAM) {
                pairs.append_pair(name, value);
            }
            pairs.append_pair(API_KEY_PARAM, &self.api_key);
        }

        Ok(url)
    }

    /// Sends a GET request and decodes the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// - The request cannot be sent or the body cannot be read.
    /// - The service answers with a non-success status ([`RequestFailed`]).
    /// - The body does not decode as `T`.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T> {
        let url = self.request_url(path, params)?;
        tracing::debug!(url = %redact_api_key(&url), "TMDB API request");

        let result = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let detail = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or(body, |error_response| error_response.status_message);
            tracing::warn!(status = status.as_u16(), %detail, "TMDB API error");
            return Err(RequestFailed::new(status, path, detail).into());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        serde_json::from_str(&body).with_context(|| format!("failed to decode JSON response: {path}"))
    }

    /// Fetches the API configuration (image base URLs, sizes).
    ///
    /// Doubles as a cheap check that the API key is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an invalid key yields
    /// [`RequestFailed`] with HTTP 401.
    #[instrument(skip_all)]
    pub async fn configuration(&self) -> Result<Value> {
        self.get_json("configuration", &QueryParams::new()).await
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn request(&self, path: &str, params: &QueryParams) -> Result<Value> {
        self.get_json(path, params).await
    }
}
