//! Error types produced while querying Overpass.

use thiserror::Error;

/// Errors raised when fetching campsite elements.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverpassError {
    /// The server answered with a non-success status.
    #[error("Overpass request to {url} failed with status {status}: {body}")]
    Status {
        /// Endpoint the query was posted to.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, usually a plain-text explanation.
        body: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("network error contacting Overpass at {url}")]
    Transport {
        /// Endpoint the query was posted to.
        url: String,
        /// Error reported by the HTTP client.
        #[source]
        source: reqwest::Error,
    },
    /// The body was not a valid Overpass JSON document.
    #[error("failed to decode Overpass response from {url}")]
    Decode {
        /// Endpoint the query was posted to.
        url: String,
        /// Error reported by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
