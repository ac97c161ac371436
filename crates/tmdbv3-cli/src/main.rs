//! tmdbv3 - command-line client for The Movie Database API v3.

/// Application configuration (TOML).
mod config;

use std::ffi::OsStr;
use std::fmt::Display;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};
use tmdbv3_api::tmdb::{
    MovieList, MovieProperty, PersonProperty, QueryParams, SearchKind, TmdbClient, search,
    search_movie_all,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// TMDB API key. Falls back to config `tmdb.api_key` if omitted.
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Response language (e.g. "en-US"). Falls back to config `tmdb.language`.
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the API configuration (also verifies the API key).
    Configuration,
    /// Get a movie or one of its sub-resources.
    Movie(MovieArgs),
    /// Get a movie list (latest, upcoming, now-playing, popular, top-rated).
    Movies(MoviesArgs),
    /// Search movies, collections or people.
    Search(SearchArgs),
    /// Get a collection.
    Collection(CollectionArgs),
    /// Get a company.
    Company(CompanyArgs),
    /// Get a person or one of their sub-resources.
    Person(PersonArgs),
    /// Get a person list.
    People(PeopleArgs),
    /// Get a review.
    Review(ReviewArgs),
    /// Manage the local config file.
    Config(ConfigCommand),
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Sub-resource (`-` may replace `_`). Omit for the movie itself.
    #[arg(long, value_parser = NamedValueParser::<MovieProperty>::new(MovieProperty::ALL.map(MovieProperty::as_str)))]
    property: Option<MovieProperty>,
    /// Result page for paged sub-resources.
    #[arg(long)]
    page: Option<u32>,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesArgs {
    /// List name (`-` may replace `_`).
    #[arg(value_parser = NamedValueParser::<MovieList>::new(MovieList::ALL.map(MovieList::as_str)))]
    list: MovieList,
    /// Result page (1..=1000).
    #[arg(long)]
    page: Option<u32>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// What to search.
    #[arg(value_parser = NamedValueParser::<SearchKind>::new(SearchKind::ALL.map(SearchKind::as_str)))]
    kind: SearchKind,
    /// Search query (e.g. "The Matrix").
    #[arg(long, required = true)]
    query: String,
    /// Fetch every result page (movie only).
    #[arg(long, conflicts_with = "page")]
    all: bool,
    /// Result page (1..=1000).
    #[arg(long)]
    page: Option<u32>,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
    /// Include adult titles.
    #[arg(long)]
    include_adult: bool,
}

/// Arguments for the `collection` subcommand.
#[derive(clap::Args)]
struct CollectionArgs {
    /// TMDB collection ID.
    #[arg(long, required = true)]
    id: u64,
    /// Fetch images instead of the collection record.
    #[arg(long)]
    images: bool,
}

/// Arguments for the `company` subcommand.
#[derive(clap::Args)]
struct CompanyArgs {
    /// TMDB company ID.
    #[arg(long, required = true)]
    id: u64,
    /// Fetch the company's movies instead of the company record.
    #[arg(long)]
    movies: bool,
    /// Result page for `--movies`.
    #[arg(long, requires = "movies")]
    page: Option<u32>,
}

/// Arguments for the `person` subcommand.
#[derive(clap::Args)]
struct PersonArgs {
    /// TMDB person ID.
    #[arg(long, required = true)]
    id: u64,
    /// Sub-resource (`-` may replace `_`).
    #[arg(long, value_parser = NamedValueParser::<PersonProperty>::new(PersonProperty::ALL.map(PersonProperty::as_str)))]
    property: Option<PersonProperty>,
}

/// Person lists.
#[derive(Clone, Copy, ValueEnum)]
enum PeopleList {
    /// `person/popular`
    Popular,
    /// `person/latest`
    Latest,
}

/// Arguments for the `people` subcommand.
#[derive(clap::Args)]
struct PeopleArgs {
    /// List name.
    #[arg(value_enum)]
    list: PeopleList,
    /// Result page for `popular`.
    #[arg(long)]
    page: Option<u32>,
}

/// Arguments for the `review` subcommand.
#[derive(clap::Args)]
struct ReviewArgs {
    /// TMDB review ID.
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the current config (the API key is masked).
    Show,
    /// Store settings in the config file.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// API key to store.
    #[arg(long = "key")]
    key: Option<String>,
    /// API host to store.
    #[arg(long)]
    api_uri: Option<String>,
    /// Default language to store.
    #[arg(long = "default-language")]
    default_language: Option<String>,
}

/// Value parser for the library's name enums.
///
/// Parses through `FromStr` and lists the canonical names in `--help`.
#[derive(Clone)]
struct NamedValueParser<T> {
    names: Vec<&'static str>,
    target: PhantomData<fn() -> T>,
}

impl<T> NamedValueParser<T> {
    fn new(names: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            names: names.into_iter().collect(),
            target: PhantomData,
        }
    }
}

impl<T> TypedValueParser for NamedValueParser<T>
where
    T: FromStr + Clone + Send + Sync + 'static,
    T::Err: Display,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        raw.parse::<T>().map_err(|err| {
            let arg = arg.map_or_else(|| String::from("..."), ToString::to_string);
            clap::Error::raw(
                ErrorKind::InvalidValue,
                format!(
                    "invalid value '{raw}' for '{arg}': {err}\n  [possible values: {}]\n",
                    self.names.join(", ")
                ),
            )
            .with_cmd(cmd)
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(self.names.iter().copied().map(PossibleValue::new)))
    }
}

/// Builds a `TmdbClient` from the CLI key or config fallback.
///
/// # Errors
///
/// Returns an error if no API key is available or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(api_key: Option<&str>, config: &TmdbConfig) -> Result<TmdbClient> {
    let non_blank = |key: &&str| !key.trim().is_empty();
    let api_key = api_key
        .filter(non_blank)
        .or_else(|| config.api_key.as_deref().filter(non_blank))
        .context(
            "TMDB API key is not configured (use --api-key, TMDB_API_KEY or `tmdbv3 config set --key`)",
        )?;

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(api_uri) = &config.api_uri {
        builder = builder.api_uri(api_uri.as_str());
    }
    if let Some(version) = config.version {
        builder = builder.version(version);
    }
    builder.build().context("failed to build TMDB client")
}

/// Base query parameters shared by every request.
fn base_params(language: Option<&str>, config: &TmdbConfig) -> QueryParams {
    match language.or(config.language.as_deref()) {
        Some(language) => QueryParams::new().language(language),
        None => QueryParams::new(),
    }
}

/// Adds `page` when given.
fn with_page(params: &QueryParams, page: Option<u32>) -> QueryParams {
    match page {
        Some(page) => params.clone().page(page),
        None => params.clone(),
    }
}

/// Logs a response body as pretty-printed JSON.
fn log_json(value: &Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("failed to format response")?;
    tracing::info!("{pretty}");
    Ok(())
}

/// Display label for a search result.
fn result_label(kind: SearchKind, item: &Value) -> String {
    let field = |name: &str| item.get(name).and_then(Value::as_str).unwrap_or("-");
    match kind {
        SearchKind::Movie => format!("{}\t{}", field("title"), field("release_date")),
        SearchKind::Collection | SearchKind::Person => String::from(field("name")),
    }
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_movie(client: &TmdbClient, args: &MovieArgs, params: &QueryParams) -> Result<()> {
    let movie = client.movie(args.id);
    let params = with_page(params, args.page);
    let body = match args.property {
        Some(property) => movie
            .property(property, &params)
            .await
            .with_context(|| format!("TMDB {}/{property} request failed", movie.path()))?,
        None => movie
            .info(&params)
            .await
            .with_context(|| format!("TMDB {} request failed", movie.path()))?,
    };
    log_json(&body)
}

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_movies(client: &TmdbClient, args: &MoviesArgs, params: &QueryParams) -> Result<()> {
    let params = with_page(params, args.page);
    let body = client
        .movie_list(args.list, &params)
        .await
        .with_context(|| format!("TMDB {} request failed", args.list.path()))?;
    log_json(&body)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if `--all` is used with a non-movie search or the API request fails.
#[instrument(skip_all)]
async fn run_search(client: &TmdbClient, args: &SearchArgs, params: &QueryParams) -> Result<()> {
    if args.all && args.kind != SearchKind::Movie {
        bail!("--all is only supported for movie searches");
    }

    let mut params = with_page(params, args.page);
    if let Some(year) = args.year {
        params = params.year(year);
    }
    if args.include_adult {
        params = params.include_adult(true);
    }

    let results = if args.all {
        search_movie_all(client, &args.query, &params).await
    } else {
        search(client, args.kind, &args.query, &params).await
    }
    .with_context(|| format!("TMDB {} request failed", args.kind.path()))?;

    tracing::info!("Total results: {}", results.len());
    tracing::info!("ID\tName");
    for item in &results {
        tracing::info!(
            "{}\t{}",
            item.get("id")
                .map_or_else(|| String::from("-"), ToString::to_string),
            result_label(args.kind, item),
        );
    }

    Ok(())
}

/// Runs the `collection` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_collection(
    client: &TmdbClient,
    args: &CollectionArgs,
    params: &QueryParams,
) -> Result<()> {
    let collection = client.collection(args.id);
    let body = if args.images {
        collection.images(params).await
    } else {
        collection.info(params).await
    }
    .with_context(|| format!("TMDB {} request failed", collection.path()))?;
    log_json(&body)
}

/// Runs the `company` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_company(client: &TmdbClient, args: &CompanyArgs, params: &QueryParams) -> Result<()> {
    let company = client.company(args.id);
    let body = if args.movies {
        company.movies(&with_page(params, args.page)).await
    } else {
        company.info(params).await
    }
    .with_context(|| format!("TMDB {} request failed", company.path()))?;
    log_json(&body)
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_person(client: &TmdbClient, args: &PersonArgs, params: &QueryParams) -> Result<()> {
    let person = client.person(args.id);
    let body = match args.property {
        Some(property) => person.property(property, params).await,
        None => person.info(params).await,
    }
    .with_context(|| format!("TMDB {} request failed", person.path()))?;
    log_json(&body)
}

/// Runs the `people` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_people(client: &TmdbClient, args: &PeopleArgs, params: &QueryParams) -> Result<()> {
    let body = match args.list {
        PeopleList::Popular => client.popular_people(&with_page(params, args.page)).await,
        PeopleList::Latest => client.latest_person(params).await,
    }
    .context("TMDB person list request failed")?;
    log_json(&body)
}

/// Runs the `review` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_review(client: &TmdbClient, args: &ReviewArgs, params: &QueryParams) -> Result<()> {
    let review = client.review(args.id.as_str());
    let body = review
        .info(params)
        .await
        .with_context(|| format!("TMDB {} request failed", review.path()))?;
    log_json(&body)
}

/// Runs the `configuration` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails (HTTP 401 for a rejected key).
#[instrument(skip_all)]
async fn run_configuration(client: &TmdbClient) -> Result<()> {
    let body = client
        .configuration()
        .await
        .context("TMDB configuration request failed")?;
    tracing::info!("API key accepted");
    log_json(&body)
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_config(cmd: &ConfigCommand, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    match &cmd.command {
        ConfigSubcommands::Show => {
            tracing::info!("Config: {}", config_path.display());
            tracing::info!(
                "api_key: {}",
                if config.tmdb.api_key.is_some() {
                    "***"
                } else {
                    "-"
                }
            );
            tracing::info!("api_uri: {}", config.tmdb.api_uri.as_deref().unwrap_or("-"));
            tracing::info!(
                "version: {}",
                config
                    .tmdb
                    .version
                    .map_or_else(|| String::from("-"), |v| v.to_string())
            );
            tracing::info!(
                "language: {}",
                config.tmdb.language.as_deref().unwrap_or("-")
            );
        }
        ConfigSubcommands::Set(args) => {
            if args.key.is_none() && args.api_uri.is_none() && args.default_language.is_none() {
                bail!("nothing to set (use --key, --api-uri or --default-language)");
            }
            if let Some(key) = &args.key {
                config.tmdb.api_key = Some(key.clone());
            }
            if let Some(api_uri) = &args.api_uri {
                config.tmdb.api_uri = Some(api_uri.clone());
            }
            if let Some(language) = &args.default_language {
                config.tmdb.language = Some(language.clone());
            }
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved config to {}", config_path.display());
        }
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let Cli {
        dir,
        api_key,
        language,
        command,
    } = Cli::parse();

    if let Commands::Config(cmd) = &command {
        return run_config(cmd, dir.as_ref());
    }

    let config_path = resolve_config_path(dir.as_ref()).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let client = build_tmdb_client(api_key.as_deref(), &config.tmdb)?;
    let params = base_params(language.as_deref(), &config.tmdb);

    match command {
        Commands::Configuration => run_configuration(&client).await,
        Commands::Movie(args) => run_movie(&client, &args, &params).await,
        Commands::Movies(args) => run_movies(&client, &args, &params).await,
        Commands::Search(args) => run_search(&client, &args, &params).await,
        Commands::Collection(args) => run_collection(&client, &args, &params).await,
        Commands::Company(args) => run_company(&client, &args, &params).await,
        Commands::Person(args) => run_person(&client, &args, &params).await,
        Commands::People(args) => run_people(&client, &args, &params).await,
        Commands::Review(args) => run_review(&client, &args, &params).await,
        Commands::Config(cmd) => run_config(&cmd, dir.as_ref()),
    }
}
