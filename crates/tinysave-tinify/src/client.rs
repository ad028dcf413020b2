//! Tinify HTTP client
//!
//! Wire protocol: `POST /shrink` with the raw bytes and HTTP Basic auth
//! (user `api`, password = API key) answers `201 Created` with a `Location`
//! header; a `GET` on that location with the same auth returns the
//! compressed bytes. Error responses carry a JSON body with `error` and
//! `message` fields.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{TinifyError, TinifyResult};

const TINIFY_API_BASE: &str = "https://api.tinify.com";

/// Compression service abstraction
///
/// The API key is a per-call argument: settings are resolved fresh for every
/// save event, so the client itself holds no credential state and a single
/// instance can serve concurrent invocations.
#[async_trait]
pub trait Compressor: Send + Sync {
    /// Submit a buffer for compression and return the compressed buffer.
    async fn shrink(&self, api_key: &str, data: &[u8]) -> TinifyResult<Vec<u8>>;
}

/// Error body returned by the Tinify API.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Reqwest-backed [`Compressor`] speaking the Tinify API.
///
/// No retry and no request timeout are configured; a failure or a slow
/// round-trip surfaces directly to the caller.
pub struct TinifyClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl TinifyClient {
    pub fn new() -> TinifyResult<Self> {
        Self::with_api_base(TINIFY_API_BASE)
    }

    /// Point the client at a different API base URL (used by tests).
    pub fn with_api_base(api_base: impl Into<String>) -> TinifyResult<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(TinifyError::Connection)?;

        Ok(Self {
            http_client,
            api_base: api_base.into(),
        })
    }

    async fn error_from_response(response: reqwest::Response) -> TinifyError {
        let status = response.status();
        let detail = match response.json::<ApiError>().await {
            Ok(body) if !body.error.is_empty() || !body.message.is_empty() => {
                format!("{} - {}: {}", status, body.error, body.message)
            }
            _ => status.to_string(),
        };

        match status.as_u16() {
            401 | 403 | 429 => TinifyError::Account(detail),
            400..=499 => TinifyError::Client(detail),
            _ => TinifyError::Server(detail),
        }
    }
}

#[async_trait]
impl Compressor for TinifyClient {
    async fn shrink(&self, api_key: &str, data: &[u8]) -> TinifyResult<Vec<u8>> {
        let url = format!("{}/shrink", self.api_base);

        let response = self
            .http_client
            .post(&url)
            .basic_auth("api", Some(api_key))
            .body(data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or_else(|| {
                TinifyError::Protocol("shrink response missing Location header".to_string())
            })?;

        tracing::debug!(location = %location, input_bytes = data.len(), "Tinify shrink accepted");

        let output = self
            .http_client
            .get(&location)
            .basic_auth("api", Some(api_key))
            .send()
            .await?;

        if !output.status().is_success() {
            return Err(Self::error_from_response(output).await);
        }

        let compressed = output.bytes().await?;

        tracing::debug!(
            input_bytes = data.len(),
            output_bytes = compressed.len(),
            "Tinify shrink completed"
        );

        Ok(compressed.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_shrink_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let output_url = format!("{}/output/abc123.png", server.url());

        let shrink_mock = server
            .mock("POST", "/shrink")
            .with_status(201)
            .with_header("location", &output_url)
            .with_body(json!({"input": {"size": 8}, "output": {"size": 3}}).to_string())
            .create_async()
            .await;
        let output_mock = server
            .mock("GET", "/output/abc123.png")
            .with_status(200)
            .with_body(vec![9u8, 8, 7])
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let compressed = client.shrink("test-key", &[0u8; 8]).await.unwrap();

        assert_eq!(compressed, vec![9u8, 8, 7]);
        shrink_mock.assert_async().await;
        output_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_shrink_bad_key_is_account_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/shrink")
            .with_status(401)
            .with_body(
                json!({"error": "Unauthorized", "message": "Credentials are invalid."})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let err = client.shrink("bad-key", &[0u8; 8]).await.unwrap_err();

        assert!(matches!(err, TinifyError::Account(_)));
        assert!(err.to_string().contains("Credentials are invalid."));
    }

    #[tokio::test]
    async fn test_shrink_quota_exhausted_is_account_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/shrink")
            .with_status(429)
            .with_body(
                json!({"error": "TooManyRequests", "message": "Monthly limit exceeded."})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let err = client.shrink("key", &[0u8; 8]).await.unwrap_err();

        assert!(matches!(err, TinifyError::Account(_)));
    }

    #[tokio::test]
    async fn test_shrink_unsupported_media_is_client_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/shrink")
            .with_status(415)
            .with_body(
                json!({"error": "Unsupported media type", "message": "File type is not supported."})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let err = client.shrink("key", b"not an image").await.unwrap_err();

        assert!(matches!(err, TinifyError::Client(_)));
    }

    #[tokio::test]
    async fn test_shrink_server_failure_is_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/shrink")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let err = client.shrink("key", &[0u8; 8]).await.unwrap_err();

        assert!(matches!(err, TinifyError::Server(_)));
    }

    #[tokio::test]
    async fn test_shrink_missing_location_is_protocol_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/shrink")
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let client = TinifyClient::with_api_base(server.url()).unwrap();
        let err = client.shrink("key", &[0u8; 8]).await.unwrap_err();

        assert!(matches!(err, TinifyError::Protocol(_)));
    }
}
