//! Worker error types.

use thiserror::Error;

use crate::download::DownloadError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Job error: {0}")]
    Rodin(#[from] veloxi_rodin::RodinError),

    #[error("Store error: {0}")]
    Store(#[from] veloxi_store::StoreError),

    #[error("Render error: {0}")]
    Render(#[from] veloxi_render::RenderError),

    #[error("Queue error: {0}")]
    Queue(#[from] veloxi_queue::QueueError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether this error means the remote job is still running.
    ///
    /// Only the job client's structured `NotReady` kind is retry-as-waiting;
    /// every other failure in a poll iteration is a fatal-candidate.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, WorkerError::Rodin(e) if e.is_not_ready())
    }
}
