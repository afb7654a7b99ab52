//! API client for the running leaderboard backend.
//!
//! This module provides the `ApiClient` struct that fetches the cumulative
//! distance list from `/running/runner-distances`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use crate::models::RunnerRecord;

use super::{ApiError, RunnerSource};

// ============================================================================
// Constants
// ============================================================================

/// Path of the distance ranking endpoint, relative to the base URL.
pub const RUNNER_DISTANCES_PATH: &str = "/running/runner-distances";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the leaderboard backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the distance ranking endpoint.
    pub fn runner_distances_url(&self) -> String {
        format!("{}{}", self.base_url, RUNNER_DISTANCES_PATH)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Fetch the unsorted runner list from the backend.
    pub async fn fetch_runner_distances(&self) -> Result<Vec<RunnerRecord>, ApiError> {
        let url = self.runner_distances_url();
        debug!(url = %url, "Fetching runner distances");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await.map_err(|e| {
            warn!(url = %url, error = %e, "Runner distance request failed");
            e
        })?;

        let body = response.text().await?;
        let records = parse_runner_records(&body)?;
        debug!(count = records.len(), "Runner distances received");
        Ok(records)
    }
}

#[async_trait]
impl RunnerSource for ApiClient {
    async fn fetch_runner_distances(&self) -> Result<Vec<RunnerRecord>, ApiError> {
        ApiClient::fetch_runner_distances(self).await
    }
}

/// Parse and validate a `/running/runner-distances` response body.
///
/// Any entry that fails to parse or validate rejects the whole body; no
/// partial lists are returned.
pub fn parse_runner_records(body: &str) -> Result<Vec<RunnerRecord>, ApiError> {
    let records: Vec<RunnerRecord> = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("runner distance list: {}", e)))?;

    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|e| ApiError::Parse(format!("entry {}: {}", index, e)))?;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_runner_distances_url() {
        let api = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            api.runner_distances_url(),
            "http://localhost:8080/running/runner-distances"
        );

        // Trailing slashes on the base URL are ignored
        let api = ApiClient::new("https://example.org/").unwrap();
        assert_eq!(api.base_url(), "https://example.org");
        assert_eq!(
            api.runner_distances_url(),
            "https://example.org/running/runner-distances"
        );
    }

    #[test]
    fn test_parse_runner_records() {
        let body = r#"[{"name":"alice","totalDistance":120.4},{"name":"bob","totalDistance":340.2}]"#;
        let records = parse_runner_records(body).expect("Failed to parse runner test JSON");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "bob");
        assert_eq!(records[1].total_distance, 340.2);
    }

    #[test]
    fn test_parse_runner_records_empty_list() {
        let records = parse_runner_records("[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_runner_records_rejects_object() {
        let err = parse_runner_records(r#"{"runners":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_parse_runner_records_rejects_invalid_entry() {
        let body = r#"[{"name":"alice","totalDistance":12.0},{"name":"bob","totalDistance":-3.0}]"#;
        match parse_runner_records(body) {
            Err(ApiError::Parse(msg)) => assert!(msg.starts_with("entry 1:"), "{}", msg),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_runner_records_rejects_null_distance() {
        let body = r#"[{"name":"alice","totalDistance":null}]"#;
        assert!(matches!(parse_runner_records(body), Err(ApiError::Parse(_))));
    }

    // ------------------------------------------------------------------
    // Requests against a local server
    // ------------------------------------------------------------------

    /// Serve one canned HTTP response and hand back the request line.
    async fn serve_once(status_line: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let length = if body.is_empty() {
            String::new()
        } else {
            format!("Content-Length: {}\r\n", body.len())
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n{}Connection: close\r\n\r\n{}",
            status_line, length, body
        );

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            let request = String::from_utf8_lossy(&request).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (base_url, server)
    }

    #[tokio::test]
    async fn test_fetch_runner_distances_ok() {
        let body = r#"[{"name":"alice","totalDistance":120.4},{"name":"bob","totalDistance":340.2}]"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let api = ApiClient::new(base_url).unwrap();

        let records = api.fetch_runner_distances().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RunnerRecord::new("alice", 120.4));

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /running/runner-distances HTTP/1.1");
    }

    #[tokio::test]
    async fn test_fetch_runner_distances_error_status() {
        let body = format!("maintenance {}", "z".repeat(600));
        let (base_url, server) = serve_once("503 Service Unavailable", &body).await;
        let api = ApiClient::new(base_url).unwrap();

        match api.fetch_runner_distances().await {
            Err(ApiError::Fetch { status, message }) => {
                assert_eq!(status, 503);
                assert!(message.starts_with("Service Unavailable: maintenance "), "{}", message);
                assert!(message.ends_with("(truncated, 612 total bytes)"), "{}", message);
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_runner_distances_empty_success_body() {
        let (base_url, server) = serve_once("204 No Content", "").await;
        let api = ApiClient::new(base_url).unwrap();

        let err = api.fetch_runner_distances().await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)), "{:?}", err);
        assert_eq!(err.status(), None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_runner_distances_unreachable_host() {
        // Grab a free port, then close it so the connection is refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ApiClient::new(format!("http://{}", addr)).unwrap();
        let err = api.fetch_runner_distances().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "{:?}", err);
        assert_eq!(err.status(), None);
    }
}
