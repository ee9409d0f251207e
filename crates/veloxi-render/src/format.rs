//! Image codec selection by file extension.

use std::path::Path;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;

use crate::error::{RenderError, RenderResult};

/// Supported capture codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Select the codec from an output path's extension.
    ///
    /// Anything other than `png`/`jpeg`/`webp` is a configuration error,
    /// rejected before any rendering work starts.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpeg" => Ok(ImageFormat::Jpeg),
            "webp" => Ok(ImageFormat::Webp),
            other => Err(RenderError::unsupported_format(other)),
        }
    }

    /// The CDP screenshot format for this codec.
    pub fn to_cdp(self) -> CaptureScreenshotFormat {
        match self {
            ImageFormat::Png => CaptureScreenshotFormat::Png,
            ImageFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
            ImageFormat::Webp => CaptureScreenshotFormat::Webp,
        }
    }
}
