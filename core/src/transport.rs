//! Transport seam and plain-data request/response types.
//!
//! # Design
//! The adapter depends on the [`Transport`] trait, not on a concrete HTTP
//! client. A transport receives a URL and [`RequestOptions`] and resolves to
//! a response object whose body can be read asynchronously. Options are plain
//! data and pass through the adapter unmodified — no validation, no
//! normalization. Response metadata is captured into [`ResponseHead`] before
//! the body read so it stays available even when reading the body fails.

use std::future::Future;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// Options forwarded to the transport as-is.
///
/// The default value means a plain GET with no headers and no body, which is
/// what [`crate::request`] uses.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Response metadata, captured before the body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// A response produced by a [`Transport`].
///
/// `text` consumes the response and reads the full body into one `String`;
/// it is a separate asynchronous step that can fail independently of the
/// exchange that produced the response.
pub trait FetchResponse {
    fn status(&self) -> u16;

    fn headers(&self) -> Vec<(String, String)>;

    fn text(self) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// The external HTTP capability performing the actual network exchange.
///
/// A transport must require an absolute URL and report all of its failures
/// through [`TransportError`]; the adapter forwards those errors to the
/// completion callback without wrapping them.
pub trait Transport {
    type Response: FetchResponse;

    fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Self::Response, TransportError>> + Send;
}
