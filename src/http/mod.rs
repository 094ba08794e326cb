//! Request dispatch through a pluggable transport.
//!
//! [`HttpBackend`] issues exactly one request per call and classifies any
//! failure as either a request failure (no response) or an error response
//! (non-2xx status). The actual network round trip is performed by a
//! [`Transport`]; [`ReqwestTransport`] is the default.

mod backend;
mod request;
mod response;
mod transport;

pub use backend::{DEFAULT_TIMEOUT, HttpBackend};
pub use request::{Method, RequestBody, RequestSpec};
pub use response::Payload;
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};

#[cfg(test)]
pub use transport::MockTransport;
