//! Headless thumbnail rendering for mesh previews.
//!
//! This crate provides:
//! - The `ThumbnailRenderer` contract: one still image from a model URL,
//!   bounded by a hard deadline
//! - A headless Chromium implementation driven over CDP, capturing a
//!   `<model-viewer>` element with software GL (no GPU assumed)
//! - Image codec selection by output file extension

pub mod config;
pub mod error;
pub mod format;
pub mod headless;
pub mod page;

use std::path::Path;

use async_trait::async_trait;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use format::ImageFormat;
pub use headless::{check_chromium, HeadlessRenderer};

/// Contract for producing a single still image from a 3D model reference.
///
/// Implementations must resolve within their configured deadline and tear
/// down any rendering environment on every exit path.
#[async_trait]
pub trait ThumbnailRenderer: Send + Sync {
    /// Render `model_url` to a still image at `output_path`.
    ///
    /// The output extension selects the image codec; unsupported
    /// extensions fail before any rendering work starts.
    async fn render(&self, model_url: &str, output_path: &Path) -> RenderResult<()>;
}
