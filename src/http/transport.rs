//! Transport abstraction and the reqwest-backed implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::request::Method;
use crate::config::BackendConfig;
use crate::status_code;

/// Failure to obtain any response. Preserved as the source of
/// [`ResponseError::HttpRequestFailed`](crate::ResponseError::HttpRequestFailed).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Includes the serialized query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// `Duration::ZERO` disables the timeout.
    pub timeout: Duration,
}

/// Any response the server produced, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Performs one network round trip.
///
/// Implementations return `Ok` for every response received, including
/// error statuses, and `Err` only when no response was obtained.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest)
    -> Result<TransportResponse, TransportError>;
}

/// Transport backed by [`reqwest::Client`].
///
/// On `wasm32` targets reqwest drives the browser `fetch` API, so the same
/// type serves both native and browser-like environments.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps an existing client; its connection pool is reused across calls.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the configured user agent.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        // Zero means no timeout
        if !request.timeout.is_zero() {
            builder = builder.timeout(request.timeout);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_text = status
            .canonical_reason()
            .or_else(|| status_code::reason(status.as_u16()))
            .unwrap_or_default()
            .to_string();
        debug!("{} {} -> {}", request.method, request.url, status);

        let body = response.text().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, url: String) -> TransportRequest {
        TransportRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_execute_reports_error_status_as_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("nope")
            .create_async()
            .await;

        let transport = ReqwestTransport::default();
        let response = transport
            .execute(request(Method::Get, format!("{}/missing", server.url())))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
        assert_eq!(response.body, "nope");
    }

    #[tokio::test]
    async fn test_execute_unregistered_status_has_empty_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/odd")
            .with_status(599)
            .create_async()
            .await;

        let response = ReqwestTransport::default()
            .execute(request(Method::Get, format!("{}/odd", server.url())))
            .await
            .unwrap();

        assert_eq!(response.status, 599);
        assert_eq!(response.status_text, "");
    }

    #[tokio::test]
    async fn test_execute_zero_timeout_waits_for_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/slow")
            .with_status(200)
            .with_body("done")
            .create_async()
            .await;

        let mut req = request(Method::Get, format!("{}/slow", server.url()));
        req.timeout = Duration::ZERO;
        let response = ReqwestTransport::default().execute(req).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.body, "done");
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submit")
            .match_header("x-token", "abc")
            .match_body(r#"{"a":1}"#)
            .with_status(201)
            .with_body("created")
            .create_async()
            .await;

        let mut req = request(Method::Post, format!("{}/submit", server.url()));
        req.headers.push(("X-Token".to_string(), "abc".to_string()));
        req.body = Some(r#"{"a":1}"#.to_string());

        let response = ReqwestTransport::default().execute(req).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 201);
        assert_eq!(response.body, "created");
    }

    #[tokio::test]
    async fn test_execute_connection_refused_is_error() {
        // Port 1 on loopback is not expected to accept connections
        let result = ReqwestTransport::default()
            .execute(request(Method::Get, "http://127.0.0.1:1/".to_string()))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_invalid_header_is_error() {
        let mut req = request(Method::Get, "http://127.0.0.1:1/".to_string());
        req.headers.push(("bad header".to_string(), "v".to_string()));
        let result = ReqwestTransport::default().execute(req).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_from_config_sets_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "tester/1.0")
            .with_status(200)
            .create_async()
            .await;

        let config = BackendConfig {
            user_agent: Some("tester/1.0".to_string()),
            ..BackendConfig::default()
        };
        let transport = ReqwestTransport::from_config(&config).unwrap();
        transport
            .execute(request(Method::Get, format!("{}/", server.url())))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
