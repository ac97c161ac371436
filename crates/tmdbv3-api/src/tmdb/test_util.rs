//! Shared helpers for wiremock-backed tests.
#![allow(clippy::unwrap_used)]

use wiremock::MockServer;

use super::client::TmdbClient;

/// Starts a mock server and a client pointed at its `/3/` root.
pub async fn mock_client() -> (MockServer, TmdbClient) {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/3/", mock_server.uri());
    let client = TmdbClient::builder()
        .base_url(base_url.parse().unwrap())
        .api_key("test-key")
        .user_agent("test/0.0.0")
        .build()
        .unwrap();
    (mock_server, client)
}
