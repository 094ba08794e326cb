//! Request description types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::query::Query;

/// HTTP method supported by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    /// Returns the upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of a single request.
///
/// ```
/// use http_utils::{Query, RequestSpec};
///
/// let spec = RequestSpec::get("https://example.com/items")
///     .query(Query::new().with("page", 2))
///     .header("Accept", "application/json");
/// assert_eq!(spec.effective_url(), "https://example.com/items?page=2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    /// Overrides the backend's default timeout when set.
    pub timeout: Option<Duration>,
    /// When false the response body is returned as raw text.
    pub json: bool,
    pub query: Option<Query>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Creates a GET request with JSON decoding and no query or headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::default(),
            timeout: None,
            json: true,
            query: None,
            headers: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    /// Creates a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Post)
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a per-request timeout; `Duration::ZERO` disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Chooses between JSON decoding (`true`) and raw text (`false`).
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Sets the query parameters appended to the URL.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The URL with the serialized query string appended.
    pub fn effective_url(&self) -> String {
        format!("{}{}", self.url, crate::query::serialize(self.query.as_ref()))
    }

    /// Whether a header with a non-empty value is set, ignoring name case.
    pub(crate) fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(key, value)| key.eq_ignore_ascii_case(name) && !value.is_empty())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized to a JSON string before sending.
    Json(Value),
    /// Sent as-is.
    Text(String),
}

impl RequestBody {
    pub(crate) fn into_string(self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Text(text) => text,
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryValue;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let spec = RequestSpec::new("http://localhost");
        assert_eq!(spec.method, Method::Get);
        assert!(spec.json);
        assert!(spec.timeout.is_none());
        assert!(spec.headers.is_empty());
        assert_eq!(spec.effective_url(), "http://localhost");
    }

    #[test]
    fn test_effective_url_appends_query() {
        let spec = RequestSpec::post("http://localhost/run")
            .query(Query::new().with("dry", QueryValue::Null).with("n", 3));
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.effective_url(), "http://localhost/run?dry&n=3");
    }

    #[test]
    fn test_has_header_is_case_insensitive() {
        let spec = RequestSpec::get("http://localhost").header("content-type", "text/plain");
        assert!(spec.has_header("Content-Type"));
        assert!(!spec.has_header("Accept"));
    }

    #[test]
    fn test_empty_header_value_counts_as_missing() {
        let spec = RequestSpec::get("http://localhost").header("Content-Type", "");
        assert!(!spec.has_header("Content-Type"));
    }

    #[test]
    fn test_method_serde() {
        assert_eq!(serde_json::to_string(&Method::Post).unwrap(), r#""POST""#);
        let method: Method = serde_json::from_str(r#""GET""#).unwrap();
        assert_eq!(method, Method::Get);
        assert_eq!(Method::Get.to_string(), "GET");
    }

    #[test]
    fn test_body_into_string() {
        let body = RequestBody::from(json!({"a": [1, 2]}));
        assert_eq!(body.into_string(), r#"{"a":[1,2]}"#);
        assert_eq!(RequestBody::from("raw").into_string(), "raw");
    }
}
