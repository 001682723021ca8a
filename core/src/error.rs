//! Error types for the console-dns client.
//!
//! # Design
//! The service reports every failure as a non-200 status whose body is a
//! plain error string, so `Status` renders as exactly that body. The status
//! code is kept alongside it for callers that want to tell "zone not found"
//! apart from "server unreachable" without matching on message text.

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::http::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ZoneClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS failure, timeout).
    #[error("{0}")]
    Transport(#[source] TransportError),

    /// The server answered with a status other than 200.
    #[error("{body}")]
    Status {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },

    /// The request payload could not be serialized to JSON. Nothing was sent.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A 200 response body could not be decoded into the expected type.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) => Some(200),
            _ => None,
        }
    }

    /// Value of a response header, if a non-200 response was received.
    pub fn header(&self, name: &str) -> Option<&str> {
        match self {
            ApiError::Status { headers, .. } => crate::http::find_header(headers, name),
            _ => None,
        }
    }
}

/// Errors raised while loading a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),
}
