//! Transport error type shared by the upstream and notification clients

use thiserror::Error;

/// Failure talking to an external HTTP collaborator
///
/// These are always recovered locally: logged, and the affected operation
/// yields an empty or failed result.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or body decoding failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status code
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Response body did not have a usable shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// Whether the failure was a client-side timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }
}
