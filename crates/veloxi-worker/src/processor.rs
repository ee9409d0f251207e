//! Task processing state machine.
//!
//! One `TaskProcessor` drives a single task from admission to a terminal
//! outcome: it polls the generation job, classifies failures, downloads
//! produced assets (rendering a thumbnail when no texture can serve as
//! preview), persists the result, and notifies every phase transition.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info, warn};

use veloxi_models::{AssetLayout, MeshState, TaskId, TaskPhase};
use veloxi_queue::{Notifier, ProgressChannel};
use veloxi_render::{HeadlessRenderer, ThumbnailRenderer};
use veloxi_rodin::{GenerationJobClient, GenerationResult, RodinClient};
use veloxi_store::{MeshApiStore, MeshCompletion, NewTexture, ResultStore};

use crate::config::WorkerConfig;
use crate::download::{Downloader, HttpDownloader};
use crate::error::WorkerResult;
use crate::metrics;

/// Collaborators shared by all processing sessions.
pub struct ProcessingContext {
    pub config: WorkerConfig,
    pub layout: AssetLayout,
    pub jobs: Arc<dyn GenerationJobClient>,
    pub store: Arc<dyn ResultStore>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn ThumbnailRenderer>,
    pub downloader: Arc<dyn Downloader>,
}

impl ProcessingContext {
    /// Build the production collaborators from environment configuration.
    pub fn from_env(config: WorkerConfig) -> WorkerResult<Self> {
        let layout = config.asset_layout();
        Ok(Self {
            layout,
            jobs: Arc::new(RodinClient::from_env()?),
            store: Arc::new(MeshApiStore::from_env()?),
            notifier: Arc::new(ProgressChannel::from_env()?),
            renderer: Arc::new(HeadlessRenderer::from_env()),
            downloader: Arc::new(HttpDownloader::new()?),
            config,
        })
    }
}

/// One processing session for one task id.
///
/// Session state lives only in worker memory; it is created when the
/// scheduler dequeues the id and dropped when the loop exits.
pub struct TaskProcessor {
    task_id: TaskId,
    ctx: Arc<ProcessingContext>,
    shutdown: watch::Receiver<bool>,
}

impl TaskProcessor {
    /// Create a processor for `task_id`.
    pub fn new(task_id: TaskId, ctx: Arc<ProcessingContext>, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            task_id,
            ctx,
            shutdown,
        }
    }

    /// Drive the task to a terminal outcome.
    ///
    /// Two timers bound the session: the global task duration, checked
    /// before every poll and dominant over all other bookkeeping, and the
    /// fatal-error window, measured from the first fatal-candidate in an
    /// unbroken run of them.
    pub async fn run(self) {
        info!(task_id = %self.task_id, "Processing session started");
        self.notify(TaskPhase::Processing, "Worker started processing Rodin model.")
            .await;

        let started = Instant::now();
        let mut first_fatal: Option<Instant> = None;

        loop {
            if *self.shutdown.borrow() {
                warn!(task_id = %self.task_id, "Shutdown requested, abandoning session");
                return;
            }

            if started.elapsed() > self.ctx.config.max_task_duration {
                self.notify(TaskPhase::Timeout, "Rodin worker timeout.").await;
                self.persist_failed().await;
                metrics::record_failed("timeout");
                return;
            }

            match self.attempt().await {
                Ok(()) => {
                    self.notify(TaskPhase::Done, "Rodin task completed successfully.")
                        .await;
                    metrics::record_completed();
                    info!(task_id = %self.task_id, "Processing session succeeded");
                    return;
                }
                Err(e) if e.is_not_ready() => {
                    self.notify(TaskPhase::Waiting, "Still processing Rodin model...")
                        .await;
                    first_fatal = None;
                }
                Err(e) => {
                    let now = Instant::now();
                    let first = *first_fatal.get_or_insert(now);
                    if now.duration_since(first) > self.ctx.config.fatal_error_window {
                        self.notify(
                            TaskPhase::FatalTimeout,
                            "Rodin model failed after repeated errors.",
                        )
                        .await;
                        self.persist_failed().await;
                        metrics::record_failed("fatal_timeout");
                        return;
                    }
                    warn!(task_id = %self.task_id, "Poll failed: {}", e);
                    self.notify(
                        TaskPhase::Error,
                        &format!("Error processing Rodin task: {}", e),
                    )
                    .await;
                }
            }

            tokio::time::sleep(self.ctx.config.poll_interval).await;
        }
    }

    /// One poll attempt: fetch the job result and, when ready, resolve
    /// and persist its assets. Every error flows back to the loop for
    /// classification.
    async fn attempt(&self) -> WorkerResult<()> {
        let result = self.ctx.jobs.result(&self.task_id).await?;
        self.finalize(result).await
    }

    /// Download assets, resolve the preview image, and persist the result.
    async fn finalize(&self, result: GenerationResult) -> WorkerResult<()> {
        self.notify(TaskPhase::Downloading, "Downloading Rodin model files...")
            .await;

        let model = self.ctx.layout.model_asset(&self.task_id, &result.model_mesh.url);
        self.ctx
            .downloader
            .fetch(&result.model_mesh.url, &model.path)
            .await?;

        let preview_url = match result.textures.first() {
            Some(texture) => {
                let preview = self.ctx.layout.preview_asset(&self.task_id, &texture.url);
                self.ctx.downloader.fetch(&texture.url, &preview.path).await?;
                preview.url
            }
            None => self.render_thumbnail(&model.url).await,
        };

        let record = self
            .ctx
            .store
            .complete(&self.task_id, &MeshCompletion::new(model.url, preview_url))
            .await?;

        // Every texture is downloaded and attached, including the one
        // already used as the preview.
        for texture in &result.textures {
            let asset = self.ctx.layout.texture_asset(&self.task_id, &texture.file_name);
            self.ctx.downloader.fetch(&texture.url, &asset.path).await?;
            self.ctx
                .store
                .add_texture(&record.id, &NewTexture::pbr(asset.url))
                .await?;
        }

        Ok(())
    }

    /// Render a thumbnail against the model's servable URL.
    ///
    /// Render failures are absorbed here: the task still succeeds with
    /// the placeholder preview.
    async fn render_thumbnail(&self, model_url: &str) -> String {
        self.notify(
            TaskPhase::GeneratingThumbnail,
            "No image found, generating thumbnail from model...",
        )
        .await;

        let thumb = self.ctx.layout.thumbnail_asset(&self.task_id);
        match self.ctx.renderer.render(model_url, &thumb.path).await {
            Ok(()) => {
                self.notify(
                    TaskPhase::GeneratingThumbnailDone,
                    "Thumbnail generated successfully.",
                )
                .await;
                metrics::record_thumbnail("rendered");
                thumb.url
            }
            Err(e) => {
                warn!(task_id = %self.task_id, "Failed to generate thumbnail: {}", e);
                self.notify(
                    TaskPhase::GeneratingThumbnailFailed,
                    "Failed to generate thumbnail.",
                )
                .await;
                metrics::record_thumbnail("fallback");
                self.ctx.config.placeholder_image_url.clone()
            }
        }
    }

    /// Persist the terminal failed state.
    async fn persist_failed(&self) {
        if let Err(e) = self
            .ctx
            .store
            .update_state(&self.task_id, MeshState::Failed)
            .await
        {
            error!(task_id = %self.task_id, "Failed to persist failed state: {}", e);
        }
    }

    /// Publish a phase transition, best-effort.
    async fn notify(&self, phase: TaskPhase, message: &str) {
        if let Err(e) = self.ctx.notifier.send(&self.task_id, phase, message).await {
            warn!(task_id = %self.task_id, phase = phase.as_str(), "Notification failed: {}", e);
        }
    }
}
