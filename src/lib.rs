//! Minimal HTTP request helper.
//!
//! - [`serialize`] turns an ordered [`Query`] into a URL query string
//! - [`HttpBackend::create_request`] performs one request through a
//!   [`Transport`] and reports failures as a [`ResponseError`]
//!
//! ```no_run
//! use http_utils::{HttpBackend, Query, RequestSpec, ResponseError};
//!
//! # async fn run() -> Result<(), ResponseError> {
//! let backend = HttpBackend::new();
//! let spec = RequestSpec::get("https://rpc.example.com/chains/main/blocks")
//!     .query(Query::new().with("length", 10));
//! let payload = backend.create_request(&spec, None).await?;
//! println!("{:?}", payload.as_json());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod status_code;

pub use config::{BackendConfig, EnvSource, SystemEnv};
pub use error::ResponseError;
pub use http::{
    DEFAULT_TIMEOUT, HttpBackend, Method, Payload, ReqwestTransport, RequestBody, RequestSpec,
    Transport, TransportError, TransportRequest, TransportResponse,
};
pub use query::{CanonicalString, Query, QueryValue, serialize};

/// Crate version, taken from git tags at build time when available.
pub const VERSION: &str = env!("HTTP_UTILS_VERSION");
