//! Render error types.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Output extension does not select a supported image codec.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The viewer reported a model load error.
    #[error("Model failed to load: {0}")]
    LoadFailed(String),

    /// The viewer element could not be located for capture.
    #[error("Viewer element not found for screenshot")]
    ViewerMissing,

    /// The rendering deadline elapsed before load completion.
    #[error("Rendering timeout after {secs} seconds")]
    DeadlineExceeded { secs: u64 },

    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::LoadFailed(msg.into())
    }
}
