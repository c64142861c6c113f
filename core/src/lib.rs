//! Callback-style HTTP requests on top of a future-based fetch transport.
//!
//! # Overview
//! `request` and `request_with_options` perform exactly one HTTP exchange and
//! deliver exactly one [`Outcome`] to a caller-supplied completion callback.
//! The network exchange itself goes through the [`Transport`] trait, so the
//! adapter never touches the network directly and can be tested against an
//! in-memory transport.
//!
//! # Design
//! - The adapter is stateless; every call is independent and concurrent calls
//!   share nothing.
//! - The callback is `FnOnce`, so invoking it twice is a compile error rather
//!   than a runtime bug.
//! - [`FetchTransport`] is the bundled reqwest-backed transport; its error
//!   details pass through to the callback verbatim.

pub mod adapter;
pub mod error;
pub mod fetch;
pub mod transport;

pub use adapter::{request, request_with_options, Outcome};
pub use error::TransportError;
pub use fetch::{FetchTransport, FetchedResponse};
pub use transport::{FetchResponse, Method, RequestOptions, ResponseHead, Transport};
