use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the provisioning client.
///
/// Transport failures are split by cause so callers can tell a timed-out
/// request from a refused connection without parsing message strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProvisioningError {
    /// PROVISIONING_API_KEY was unset or empty
    #[error("PROVISIONING_API_KEY environment variable not set")]
    MissingApiKey,

    /// The request did not complete within its timeout
    #[error("request timed out")]
    Timeout,

    /// TCP/DNS-level connection failure
    #[error("connection error: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-200 status
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// The API answered 200 but the body did not decode
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProvisioningError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProvisioningError::Timeout
        } else if err.is_connect() {
            ProvisioningError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ProvisioningError::InvalidResponse(err.to_string())
        } else {
            ProvisioningError::Transport(err.to_string())
        }
    }
}
