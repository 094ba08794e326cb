//! Single-shot request dispatch and failure classification.

use anyhow::Result;
use log::debug;
use std::time::Duration;

use super::request::{RequestBody, RequestSpec};
use super::response::Payload;
use super::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::BackendConfig;
use crate::error::ResponseError;
use crate::status_code;

/// Timeout applied when neither the backend nor the request sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Dispatches single HTTP requests and classifies their failures.
///
/// The backend holds only the transport and a default timeout, so one
/// instance can be shared by any number of concurrent callers.
#[derive(Clone)]
pub struct HttpBackend<T: Transport = ReqwestTransport> {
    transport: T,
    timeout: Duration,
}

impl HttpBackend<ReqwestTransport> {
    /// Creates a reqwest-backed dispatcher with the 30 second default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a reqwest-backed dispatcher; `Duration::ZERO` means no timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_transport(ReqwestTransport::default(), timeout)
    }

    /// Builds a reqwest-backed dispatcher from configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::with_transport(
            ReqwestTransport::from_config(config)?,
            config.timeout(),
        ))
    }
}

impl Default for HttpBackend<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HttpBackend<T> {
    /// Creates a dispatcher over any transport.
    pub fn with_transport(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Default timeout for requests that do not set their own.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one request and returns its body.
    ///
    /// # Errors
    ///
    /// - [`ResponseError::HttpRequestFailed`] when no response was received
    /// - [`ResponseError::HttpResponseError`] when the status is not 2xx
    #[tracing::instrument(skip(self, spec, body), fields(method = %spec.method, url = %spec.url))]
    pub async fn create_request(
        &self,
        spec: &RequestSpec,
        body: Option<RequestBody>,
    ) -> Result<Payload, ResponseError> {
        let url = spec.effective_url();
        let timeout = spec.timeout.unwrap_or(self.timeout);

        let mut headers = spec.headers.clone();
        if !spec.has_header(CONTENT_TYPE) {
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE));
            headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        }

        debug!(
            "{} {} (timeout {}ms, json {})",
            spec.method,
            url,
            timeout.as_millis(),
            spec.json
        );

        let request = TransportRequest {
            method: spec.method,
            url: url.clone(),
            headers,
            body: body.map(RequestBody::into_string),
            timeout,
        };

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(source) => {
                debug!("{} {} failed without a response: {}", spec.method, url, source);
                return Err(ResponseError::HttpRequestFailed {
                    method: spec.method,
                    url,
                    source,
                });
            }
        };

        let payload = Payload::decode(response.body, spec.json);
        if status_code::is_success(response.status) {
            return Ok(payload);
        }

        debug!("{} {} returned error status {}", spec.method, url, response.status);
        Err(ResponseError::response(
            response.status,
            response.status_text,
            payload.into_error_body(),
            url,
        ))
    }
}
