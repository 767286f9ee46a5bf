//! Client error types.

use seat_schema::SchemaError;
use thiserror::Error;

/// Errors from the detector and booking clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request or response failed contract validation.
    #[error(transparent)]
    Contract(#[from] SchemaError),

    /// The client has no base URL configured.
    #[error("{service} client is not configured (set {service}.base_url)")]
    NotConfigured { service: &'static str },

    /// Reading the image to upload failed.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether the failure was the service asking us to slow down.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
