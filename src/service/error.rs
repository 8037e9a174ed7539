//! Triage service errors

use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("Could not reach the triage service: {0}")]
    Network(String),

    #[error("The triage service did not answer in time")]
    Timeout,

    /// Non-success status; `message` is the server's `error` field when present
    #[error("The triage service answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from the triage service: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}
