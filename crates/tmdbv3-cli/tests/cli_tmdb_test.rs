#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE_1: &str = include_str!("../../../fixtures/tmdb/search_movie_matrix_p1.json");
const SEARCH_PAGE_2: &str = include_str!("../../../fixtures/tmdb/search_movie_matrix_p2.json");
const INVALID_API_KEY: &str = include_str!("../../../fixtures/tmdb/error_invalid_api_key.json");

/// Writes a config pointing the CLI at `api_uri`.
fn write_config(dir: &std::path::Path, api_uri: &str) {
    std::fs::write(
        dir.join("config.toml"),
        format!("[tmdb]\napi_key = \"test-key\"\napi_uri = \"{api_uri}\"\n"),
    )
    .unwrap();
}

#[test]
fn test_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("movie"))
        .stdout(predicate::str::contains("--api-key"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--all"));
}

#[test]
fn test_help_lists_possible_values() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "possible values: movie, collection, person",
        ));

    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["movie", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alternative_titles"))
        .stdout(predicate::str::contains("similar_movies"));

    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["movies", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now_playing"));
}

#[test]
fn test_movie_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.arg("movie")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_search_invalid_kind() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["search", "tv", "--query", "Lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown search kind: tv"));
}

#[test]
fn test_movie_invalid_property() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["movie", "--id", "550", "--property", "casts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown movie property: casts"));
}

#[test]
fn test_missing_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.env_remove("TMDB_API_KEY")
        .args(["--dir", dir.path().to_str().unwrap(), "configuration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key is not configured"));
}

#[test]
fn test_search_all_rejects_non_movie_kind() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "--api-key",
        "dummy",
        "search",
        "person",
        "--query",
        "Keanu",
        "--all",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
        "--all is only supported for movie searches",
    ));
}

#[test]
fn test_config_set_writes_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "config",
        "set",
        "--key",
        "stored-key",
        "--default-language",
        "en-US",
    ])
    .assert()
    .success();

    // Assert
    let raw = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(raw.contains("api_key = \"stored-key\""));
    assert!(raw.contains("language = \"en-US\""));
}

#[test]
fn test_config_show_masks_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "http://localhost:1");

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_key: ***"))
        .stdout(predicate::str::contains("test-key").not());
}

#[test]
fn test_config_set_without_values() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "config", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to set"));
}

#[tokio::test]
async fn test_search_movie_all_against_mock_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE_1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE_2))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.env_remove("TMDB_API_KEY")
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "search",
            "movie",
            "--query",
            "The Matrix",
            "--all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total results: 3"))
        .stdout(predicate::str::contains("603\tThe Matrix\t1999-03-31"))
        .stdout(predicate::str::contains("605"));
}

#[tokio::test]
async fn test_configuration_rejected_key() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/configuration"))
        .respond_with(ResponseTemplate::new(401).set_body_string(INVALID_API_KEY))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbv3");
    cmd.env_remove("TMDB_API_KEY")
        .args(["--dir", dir.path().to_str().unwrap(), "configuration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 401"));
}
