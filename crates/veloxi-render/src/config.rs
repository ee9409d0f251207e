//! Renderer configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default model-viewer web component script.
const DEFAULT_MODULE_URL: &str =
    "https://ajax.googleapis.com/ajax/libs/model-viewer/3.5.0/model-viewer.min.js";

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Hard deadline for one render attempt
    pub deadline: Duration,
    /// Delay observed after load completion before capture
    pub settle: Duration,
    /// Cadence for checking the viewer's load status
    pub poll_interval: Duration,
    /// Viewport and capture size, pixels
    pub viewport: (u32, u32),
    /// Fixed camera orbit for visual consistency across renders
    pub camera_orbit: String,
    /// Fixed exposure value
    pub exposure: String,
    /// URL of the model-viewer module script
    pub module_url: String,
    /// Explicit Chromium executable; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            settle: Duration::from_secs(2),
            poll_interval: Duration::from_millis(250),
            viewport: (512, 512),
            camera_orbit: "-30deg 75deg 1.5m".to_string(),
            exposure: "1.0".to_string(),
            module_url: DEFAULT_MODULE_URL.to_string(),
            chrome_executable: None,
        }
    }
}

impl RenderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deadline: Duration::from_secs(
                std::env::var("RENDER_DEADLINE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            settle: Duration::from_millis(
                std::env::var("RENDER_SETTLE_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            poll_interval: defaults.poll_interval,
            viewport: defaults.viewport,
            camera_orbit: std::env::var("RENDER_CAMERA_ORBIT")
                .unwrap_or(defaults.camera_orbit),
            exposure: std::env::var("RENDER_EXPOSURE").unwrap_or(defaults.exposure),
            module_url: std::env::var("RENDER_MODULE_URL").unwrap_or(defaults.module_url),
            chrome_executable: std::env::var("RENDER_CHROME_PATH").ok().map(PathBuf::from),
        }
    }
}
