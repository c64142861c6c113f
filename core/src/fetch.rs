//! reqwest-backed [`Transport`] implementation.
//!
//! # Design
//! `FetchTransport` wraps a shared `reqwest::Client` (cheap to clone, reuses
//! its own connection pool). It checks URL absoluteness up front so a bad URL
//! is reported deterministically and without touching the network, then maps
//! `RequestOptions` onto the reqwest builder one-to-one. Redirects, TLS, and
//! timeouts are whatever the client defaults to; this crate imposes none of
//! its own policy on top.

use url::Url;

use crate::error::TransportError;
use crate::transport::{FetchResponse, Method, RequestOptions, Transport};

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    client: reqwest::Client,
}

impl FetchTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transport on top of an existing `reqwest::Client`, keeping the
    /// caller's connection pool and client configuration.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for FetchTransport {
    type Response = FetchedResponse;

    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<FetchedResponse, TransportError> {
        let parsed = Url::parse(url).map_err(|_| TransportError::InvalidUrl {
            url: url.to_string(),
        })?;

        let method = match options.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, parsed);
        for (key, value) in &options.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::Network {
                url: url.to_string(),
                reason: error_chain(&err),
            })?;

        Ok(FetchedResponse { inner: response })
    }
}

/// Response wrapper returned by [`FetchTransport`].
#[derive(Debug)]
pub struct FetchedResponse {
    inner: reqwest::Response,
}

impl FetchResponse for FetchedResponse {
    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.inner
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    async fn text(self) -> Result<String, TransportError> {
        self.inner
            .text()
            .await
            .map_err(|err| TransportError::BodyRead {
                reason: error_chain(&err),
            })
    }
}

/// Flatten an error and its source chain into one message. reqwest's
/// top-level display omits the underlying cause (for a DNS failure, the part
/// worth reporting).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
