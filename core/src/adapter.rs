//! Future-to-callback conversion: one transport exchange, one callback.
//!
//! # Design
//! The original interface took `(url, callback)` or `(url, options, callback)`
//! and disambiguated the shapes at run time. Here the two shapes are two
//! named entry points instead, so there is no argument inspection and a
//! missing callback cannot be expressed at all.
//!
//! The callback is `FnOnce(Outcome)`: at-most-once delivery is enforced by
//! the type system, and the two-terminal-branch flow below (fetch, then read
//! body, then deliver) guarantees at-least-once. Nothing runs — and the
//! callback cannot fire — before the returned future is first polled.

use crate::error::TransportError;
use crate::transport::{FetchResponse, RequestOptions, ResponseHead, Transport};

/// Result of one request, delivered to the completion callback exactly once.
#[derive(Debug)]
pub enum Outcome {
    /// The exchange succeeded and the body was read fully.
    Success { body: String, response: ResponseHead },

    /// The transport failed before a response was obtained (invalid URL, DNS
    /// failure, connection refused). The error is the transport's, verbatim.
    TransportFailed(TransportError),

    /// A response arrived but reading its body failed. The response metadata
    /// is still delivered alongside the error.
    BodyFailed {
        error: TransportError,
        response: ResponseHead,
    },
}

/// Perform one GET-by-default request and deliver the outcome to `callback`.
///
/// Shorthand for [`request_with_options`] with [`RequestOptions::default`].
pub async fn request<T, F>(transport: &T, url: &str, callback: F)
where
    T: Transport,
    F: FnOnce(Outcome),
{
    request_with_options(transport, url, RequestOptions::default(), callback).await;
}

/// Perform one request with explicit options and deliver the outcome to
/// `callback`.
///
/// Invokes the transport exactly once; `options` passes through unmodified.
/// On success the response metadata is captured before the body read, so
/// [`Outcome::BodyFailed`] can still report the status and headers.
pub async fn request_with_options<T, F>(
    transport: &T,
    url: &str,
    options: RequestOptions,
    callback: F,
) where
    T: Transport,
    F: FnOnce(Outcome),
{
    match transport.fetch(url, &options).await {
        Ok(response) => {
            let head = ResponseHead {
                status: response.status(),
                headers: response.headers(),
            };
            match response.text().await {
                Ok(body) => callback(Outcome::Success {
                    body,
                    response: head,
                }),
                Err(error) => callback(Outcome::BodyFailed {
                    error,
                    response: head,
                }),
            }
        }
        Err(error) => callback(Outcome::TransportFailed(error)),
    }
}
