//! Errors raised while talking to the movie database.

use reqwest::StatusCode;
use thiserror::Error;

use crate::request::Endpoint;

/// Everything that can go wrong with a single upstream request
#[derive(Error, Debug)]
pub enum TmdbError {
    /// Base URL or endpoint path did not form a valid URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS, or timeout failure
    #[error("Transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status (401 for a bad key, 429
    /// when rate limited, ...)
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
    },

    /// Body was not the JSON shape we expected
    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl TmdbError {
    /// Endpoint the failing request targeted, when one was reached
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            TmdbError::Transport { endpoint, .. }
            | TmdbError::Status { endpoint, .. }
            | TmdbError::Decode { endpoint, .. } => Some(*endpoint),
            TmdbError::InvalidUrl(_) | TmdbError::Client(_) => None,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, TmdbError>;
