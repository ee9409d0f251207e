//! Mesh API REST client.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use veloxi_models::{MeshState, TaskId};

use crate::error::{StoreError, StoreResult};
use crate::store::ResultStore;
use crate::types::{MeshCompletion, MeshRecord, NewTexture};

/// Metric names as constants for consistency.
pub mod names {
    pub const STORE_REQUESTS_TOTAL: &str = "veloxi_store_requests_total";
    pub const STORE_ERRORS_TOTAL: &str = "veloxi_store_errors_total";
}

/// Mesh API client configuration.
#[derive(Debug, Clone)]
pub struct MeshApiConfig {
    /// Internal mesh API base URL
    pub base_url: String,
    /// Bearer token for service-to-service auth
    pub auth_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl MeshApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var("MESH_API_BASE").map_err(|_| {
            StoreError::config_error("MESH_API_BASE must be set to persist mesh results")
        })?;
        if base_url.is_empty() {
            return Err(StoreError::config_error("MESH_API_BASE cannot be empty"));
        }

        Ok(Self {
            base_url,
            auth_token: std::env::var("MESH_API_TOKEN").ok(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

/// REST implementation of `ResultStore` against the platform mesh API.
pub struct MeshApiStore {
    http: Client,
    config: MeshApiConfig,
}

impl MeshApiStore {
    /// Create a new mesh API store.
    pub fn new(config: MeshApiConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("veloxi-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(MeshApiConfig::from_env()?)
    }

    fn mesh_url(&self, task_id: &TaskId) -> String {
        format!(
            "{}/internal/meshes/{}",
            self.config.base_url.trim_end_matches('/'),
            task_id
        )
    }

    fn textures_url(&self, mesh_id: &str) -> String {
        format!(
            "{}/internal/meshes/{}/textures",
            self.config.base_url.trim_end_matches('/'),
            mesh_id
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(
        &self,
        op: &'static str,
        response: reqwest::Response,
    ) -> StoreResult<reqwest::Response> {
        counter!(names::STORE_REQUESTS_TOTAL, &[("op", op)]).increment(1);

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        counter!(names::STORE_ERRORS_TOTAL, &[("op", op)]).increment(1);
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(body)),
            s => Err(StoreError::api(s.as_u16(), body)),
        }
    }
}

#[async_trait]
impl ResultStore for MeshApiStore {
    async fn update_state(&self, task_id: &TaskId, state: MeshState) -> StoreResult<()> {
        debug!(task_id = %task_id, state = state.as_str(), "Updating mesh state");

        let response = self
            .request(self.http.patch(self.mesh_url(task_id)))
            .json(&serde_json::json!({ "state": state }))
            .send()
            .await?;

        self.check("update_state", response).await?;
        Ok(())
    }

    async fn complete(
        &self,
        task_id: &TaskId,
        completion: &MeshCompletion,
    ) -> StoreResult<MeshRecord> {
        let response = self
            .request(self.http.patch(self.mesh_url(task_id)))
            .json(completion)
            .send()
            .await?;

        let response = self.check("complete", response).await?;
        let body = response.text().await?;
        let record: MeshRecord = serde_json::from_str(&body).map_err(|e| {
            StoreError::invalid_response(format!("failed to parse mesh record: {}", e))
        })?;

        info!(task_id = %task_id, mesh_id = %record.id, "Persisted mesh completion");
        Ok(record)
    }

    async fn add_texture(&self, mesh_id: &str, texture: &NewTexture) -> StoreResult<()> {
        debug!(mesh_id, url = %texture.url, "Attaching texture record");

        let response = self
            .request(self.http.post(self.textures_url(mesh_id)))
            .json(texture)
            .send()
            .await?;

        self.check("add_texture", response).await?;
        Ok(())
    }
}
