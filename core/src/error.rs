//! Error type shared by transports and the adapter.
//!
//! # Design
//! The adapter forwards transport errors verbatim, so the variants mirror
//! where the exchange failed rather than any locally-invented taxonomy:
//! before the network (`InvalidUrl`), during the exchange (`Network`), or
//! while materializing the body (`BodyRead`). Display texts for the first
//! two keep the wording callers of the original interface matched on.

use std::fmt;

/// Failure reported by a [`crate::Transport`].
#[derive(Debug)]
pub enum TransportError {
    /// The URL is relative or otherwise not parseable as an absolute URL.
    /// Detected before any network activity.
    InvalidUrl { url: String },

    /// DNS resolution, connection, or protocol failure — no response was
    /// obtained. `reason` carries the transport's full cause chain.
    Network { url: String, reason: String },

    /// A response arrived but its body could not be read to completion.
    BodyRead { reason: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl { .. } => {
                write!(f, "Only absolute URLs are supported")
            }
            TransportError::Network { url, reason } => {
                write!(f, "request to {url} failed, reason: {reason}")
            }
            TransportError::BodyRead { reason } => {
                write!(f, "failed to read response body: {reason}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message() {
        let err = TransportError::InvalidUrl {
            url: "not_a_url".to_string(),
        };
        assert_eq!(err.to_string(), "Only absolute URLs are supported");
    }

    #[test]
    fn network_message_names_url_and_reason() {
        let err = TransportError::Network {
            url: "http://wrong.invalid/".to_string(),
            reason: "dns error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request to http://wrong.invalid/ failed, reason: dns error"
        );
    }

    #[test]
    fn body_read_message_names_reason() {
        let err = TransportError::BodyRead {
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read response body: connection reset"
        );
    }
}
