//! Errors surfaced by [`HttpBackend::create_request`](crate::http::HttpBackend::create_request).

use thiserror::Error;

use crate::http::{Method, TransportError};

/// The two ways a request can fail.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// No HTTP response was received (connection refused, DNS failure,
    /// timeout, invalid request, ...).
    #[error("{method} {url} {source}")]
    HttpRequestFailed {
        method: Method,
        url: String,
        #[source]
        source: TransportError,
    },

    /// The server answered with a status outside the 2xx range.
    #[error("{message}")]
    HttpResponseError {
        message: String,
        status: u16,
        status_text: String,
        body: String,
        url: String,
    },
}

impl ResponseError {
    pub(crate) fn response(status: u16, status_text: String, body: String, url: String) -> Self {
        ResponseError::HttpResponseError {
            message: format!("Http error response: ({}) {}", status, body),
            status,
            status_text,
            body,
            url,
        }
    }

    /// Status code of an error response; `None` when no response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseError::HttpRequestFailed { .. } => None,
            ResponseError::HttpResponseError { status, .. } => Some(*status),
        }
    }

    /// The effective request URL, including the query string.
    pub fn url(&self) -> &str {
        match self {
            ResponseError::HttpRequestFailed { url, .. } => url,
            ResponseError::HttpResponseError { url, .. } => url,
        }
    }

    pub fn is_request_failed(&self) -> bool {
        matches!(self, ResponseError::HttpRequestFailed { .. })
    }

    pub fn is_response_error(&self) -> bool {
        matches!(self, ResponseError::HttpResponseError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_response_error_message() {
        let err = ResponseError::response(
            404,
            "Not Found".to_string(),
            r#"{"error":"not found"}"#.to_string(),
            "http://localhost/x?a=1".to_string(),
        );

        assert_eq!(
            err.to_string(),
            r#"Http error response: (404) {"error":"not found"}"#
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.url(), "http://localhost/x?a=1");
        assert!(err.is_response_error());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_request_failed_keeps_source() {
        let err = ResponseError::HttpRequestFailed {
            method: Method::Post,
            url: "http://localhost/y".to_string(),
            source: "connection refused".into(),
        };

        assert_eq!(err.to_string(), "POST http://localhost/y connection refused");
        assert_eq!(err.status(), None);
        assert!(err.is_request_failed());
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }
}
