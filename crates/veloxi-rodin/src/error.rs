//! Rodin client error types.

use thiserror::Error;

pub type RodinResult<T> = Result<T, RodinError>;

#[derive(Debug, Error)]
pub enum RodinError {
    /// The remote job has not produced a result yet. The queue API answers
    /// 400/404 for jobs that are still queued or running, so this kind is
    /// retryable rather than fatal.
    #[error("Job result not ready")]
    NotReady,

    #[error("Rodin API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RodinError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether this error means the job is still running and should be
    /// polled again.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, RodinError::NotReady)
    }
}
