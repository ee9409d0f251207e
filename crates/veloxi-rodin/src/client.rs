//! Rodin queue REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use veloxi_models::TaskId;

use crate::error::{RodinError, RodinResult};
use crate::types::GenerationResult;

/// Rodin client configuration.
#[derive(Debug, Clone)]
pub struct RodinConfig {
    /// Queue API base URL
    pub base_url: String,
    /// fal.ai API key
    pub api_key: String,
    /// Application slug the jobs run under
    pub model_slug: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl RodinConfig {
    /// Create config from environment variables.
    pub fn from_env() -> RodinResult<Self> {
        let api_key = std::env::var("FAL_KEY")
            .map_err(|_| RodinError::config_error("FAL_KEY must be set to poll Rodin jobs"))?;
        if api_key.is_empty() {
            return Err(RodinError::config_error("FAL_KEY cannot be empty"));
        }

        Ok(Self {
            base_url: std::env::var("FAL_API_BASE")
                .unwrap_or_else(|_| "https://queue.fal.run".to_string()),
            api_key,
            model_slug: std::env::var("RODIN_MODEL_SLUG")
                .unwrap_or_else(|_| "fal-ai/hyper3d".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

/// Contract for polling a remote generation job.
///
/// The processor only depends on this trait plus the `NotReady` error
/// kind, keeping the polling policy independent of the fal.ai wire format.
#[async_trait]
pub trait GenerationJobClient: Send + Sync {
    /// Fetch the current result of the job identified by `task_id`.
    async fn result(&self, task_id: &TaskId) -> RodinResult<GenerationResult>;
}

/// REST client for the fal.ai queue result endpoint.
pub struct RodinClient {
    http: Client,
    config: RodinConfig,
}

impl RodinClient {
    /// Create a new Rodin client.
    pub fn new(config: RodinConfig) -> RodinResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("veloxi-rodin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RodinError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> RodinResult<Self> {
        Self::new(RodinConfig::from_env()?)
    }

    fn result_url(&self, task_id: &TaskId) -> String {
        format!(
            "{}/{}/requests/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_slug,
            task_id
        )
    }
}

#[async_trait]
impl GenerationJobClient for RodinClient {
    async fn result(&self, task_id: &TaskId) -> RodinResult<GenerationResult> {
        let url = self.result_url(task_id);
        debug!(task_id = %task_id, %url, "Polling Rodin job result");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Key {}", self.config.api_key))
            .send()
            .await?;

        let status = response.status();
        match status {
            // The queue answers 400/404 while the job is still queued or
            // running; both mean "poll again later", not failure.
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(RodinError::NotReady),
            s if s.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| {
                    RodinError::invalid_response(format!("failed to parse job result: {}", e))
                })
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(RodinError::api(s.as_u16(), body))
            }
        }
    }
}
