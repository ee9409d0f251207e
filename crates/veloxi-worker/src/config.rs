//! Worker configuration.

use std::net::SocketAddr;
use std::time::Duration;

use veloxi_models::AssetLayout;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum concurrent processing sessions
    pub max_concurrent_tasks: usize,
    /// Cadence of job polls and queue wake-ups
    pub poll_interval: Duration,
    /// Upper bound on one task's total processing time
    pub max_task_duration: Duration,
    /// How long fatal-candidate errors may persist before the session fails
    pub fatal_error_window: Duration,
    /// Graceful shutdown timeout
    pub shutdown_timeout: Duration,
    /// Root directory for downloaded assets
    pub storage_root: String,
    /// Public base URL assets are served from
    pub base_url: String,
    /// Preview image used when thumbnail rendering fails
    pub placeholder_image_url: String,
    /// Redis list the platform pushes task ids onto
    pub intake_key: String,
    /// Prometheus exporter listen address, disabled when unset
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 1,
            poll_interval: Duration::from_secs(5),
            max_task_duration: Duration::from_secs(600), // 10 minutes
            fatal_error_window: Duration::from_secs(60),
            shutdown_timeout: Duration::from_secs(30),
            storage_root: "storage".to_string(),
            base_url: "https://veloxiai.app".to_string(),
            placeholder_image_url: "https://veloxiai.app/icon.png".to_string(),
            intake_key: "veloxi:mesh:intake".to_string(),
            metrics_addr: None,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_tasks: std::env::var("WORKER_MAX_TASKS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            poll_interval: Duration::from_secs(
                std::env::var("WORKER_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_task_duration: Duration::from_secs(
                std::env::var("WORKER_MAX_TASK_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            fatal_error_window: Duration::from_secs(
                std::env::var("WORKER_FATAL_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            shutdown_timeout: Duration::from_secs(
                std::env::var("WORKER_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            storage_root: std::env::var("WORKER_STORAGE_ROOT")
                .unwrap_or_else(|_| "storage".to_string()),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "https://veloxiai.app".to_string()),
            placeholder_image_url: std::env::var("WORKER_PLACEHOLDER_IMAGE")
                .unwrap_or_else(|_| "https://veloxiai.app/icon.png".to_string()),
            intake_key: std::env::var("INTAKE_LIST_KEY")
                .unwrap_or_else(|_| "veloxi:mesh:intake".to_string()),
            metrics_addr: std::env::var("METRICS_ADDR")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Asset layout derived from storage root and base URL.
    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout::new(&self.storage_root, &self.base_url)
    }
}
