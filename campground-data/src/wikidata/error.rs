//! Error types produced while fetching entity documents.

use thiserror::Error;

/// Errors raised when an entity document cannot be obtained.
///
/// The resolver absorbs these; they surface only through [`EntitySource`]
/// implementations and debug logs.
///
/// [`EntitySource`]: super::EntitySource
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntityLookupError {
    /// The server answered with a non-success status.
    #[error("entity request to {url} failed with status {status}")]
    Status {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request could not be sent or the body could not be read.
    #[error("network error contacting {url}")]
    Transport {
        /// Fully qualified request URL.
        url: String,
        /// Error reported by the HTTP client.
        #[source]
        source: reqwest::Error,
    },
    /// The body was not valid JSON.
    #[error("failed to decode entity document from {url}")]
    Decode {
        /// Fully qualified request URL.
        url: String,
        /// Error reported by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
