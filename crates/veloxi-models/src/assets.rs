//! Deterministic asset path and servable-URL derivation.
//!
//! Every asset the worker stores lives under fixed subdirectories of the
//! storage root, named by task id and a role suffix. The externally
//! servable URL joins the configured base URL with the same relative
//! path, so path derivation is a pure function of its inputs.

use std::path::{Path, PathBuf};

use url::Url;

use crate::task::TaskId;

/// Relative directory for downloaded model files.
const MODELS_DIR: &str = "assets/models";
/// Relative directory for preview images, thumbnails, and textures.
const IMAGES_DIR: &str = "assets/images";

/// Fallback extension for model files whose URL carries none.
const DEFAULT_MODEL_EXT: &str = ".glb";
/// Fallback extension for image files whose URL carries none.
const DEFAULT_IMAGE_EXT: &str = ".png";

/// A locally stored asset: filesystem path plus servable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAsset {
    /// Path on the worker's filesystem
    pub path: PathBuf,
    /// Externally reachable URL for the same file
    pub url: String,
}

/// Storage layout shared by all asset kinds.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    storage_root: PathBuf,
    base_url: String,
}

impl AssetLayout {
    /// Create a layout rooted at `storage_root`, serving from `base_url`.
    pub fn new(storage_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            storage_root: storage_root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Local path and servable URL for the primary model file.
    ///
    /// The extension comes from the remote URL's path, defaulting to `.glb`.
    pub fn model_asset(&self, task_id: &TaskId, remote_url: &str) -> LocalAsset {
        let ext = url_extension(remote_url).unwrap_or_else(|| DEFAULT_MODEL_EXT.to_string());
        self.asset(MODELS_DIR, format!("{}{}", task_id, ext))
    }

    /// Local path and servable URL for the preview image taken from the
    /// first texture. Extension from the URL, defaulting to `.png`.
    pub fn preview_asset(&self, task_id: &TaskId, remote_url: &str) -> LocalAsset {
        let ext = url_extension(remote_url).unwrap_or_else(|| DEFAULT_IMAGE_EXT.to_string());
        self.asset(IMAGES_DIR, format!("{}_refine{}", task_id, ext))
    }

    /// Local path and servable URL for a rendered thumbnail.
    pub fn thumbnail_asset(&self, task_id: &TaskId) -> LocalAsset {
        self.asset(IMAGES_DIR, format!("{}_thumb.png", task_id))
    }

    /// Local path and servable URL for a texture file.
    pub fn texture_asset(&self, task_id: &TaskId, file_name: &str) -> LocalAsset {
        self.asset(IMAGES_DIR, format!("{}_{}", task_id, file_name))
    }

    fn asset(&self, dir: &str, file_name: String) -> LocalAsset {
        let rel = format!("{}/{}", dir, file_name);
        LocalAsset {
            path: self.storage_root.join(&rel),
            url: format!("{}/{}", self.base_url, rel),
        }
    }
}

/// Extract the dotted extension from a URL's path component.
///
/// Query strings and fragments are ignored; an unparseable URL yields
/// no extension rather than an error.
fn url_extension(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let ext = Path::new(parsed.path()).extension()?;
    Some(format!(".{}", ext.to_string_lossy()))
}
