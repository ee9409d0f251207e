//! Headless Chromium renderer.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::format::ImageFormat;
use crate::page::{viewer_page, STATUS_GLOBAL};
use crate::ThumbnailRenderer;

/// Executables probed when no explicit Chromium path is configured.
const CHROMIUM_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Locate a Chromium executable for rendering.
pub fn check_chromium(config: &RenderConfig) -> RenderResult<PathBuf> {
    if let Some(path) = &config.chrome_executable {
        return Ok(path.clone());
    }
    for candidate in CHROMIUM_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }
    Err(RenderError::Launch(
        "no Chromium executable found on PATH".to_string(),
    ))
}

/// Renderer capturing a `<model-viewer>` element in headless Chromium.
///
/// The browser runs with SwiftShader software GL so renders work without
/// a GPU. Teardown runs on every exit path, whichever side of the
/// deadline race fires first.
pub struct HeadlessRenderer {
    config: RenderConfig,
}

impl HeadlessRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(RenderConfig::from_env())
    }

    fn browser_config(&self) -> RenderResult<BrowserConfig> {
        let (width, height) = self.config.viewport;
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(width, height)
            .args(vec![
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--enable-webgl",
                "--use-gl=swiftshader",
                "--ignore-gpu-blocklist",
            ]);
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(RenderError::Launch)
    }

    /// Load the viewer page and capture it once ready.
    ///
    /// The load wait and the settle delay both run inside the deadline
    /// race; a load error fails immediately without waiting it out.
    async fn capture(
        &self,
        page: &Page,
        model_url: &str,
        output_path: &Path,
        format: ImageFormat,
    ) -> RenderResult<()> {
        page.set_content(viewer_page(model_url, &self.config))
            .await?;

        let attempt = async {
            wait_for_load(page, self.config.poll_interval).await?;
            tokio::time::sleep(self.config.settle).await;
            Ok(())
        };
        run_with_deadline(self.config.deadline, attempt).await?;

        let element = page
            .find_element("#viewer")
            .await
            .map_err(|_| RenderError::ViewerMissing)?;
        let data = element.screenshot(format.to_cdp()).await?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, &data).await?;

        debug!(output = %output_path.display(), bytes = data.len(), "Captured thumbnail");
        Ok(())
    }
}

#[async_trait]
impl ThumbnailRenderer for HeadlessRenderer {
    async fn render(&self, model_url: &str, output_path: &Path) -> RenderResult<()> {
        // Reject a bad output extension before launching anything.
        let format = ImageFormat::from_path(output_path)?;

        let (mut browser, mut handler) = Browser::launch(self.browser_config()?).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = match browser.new_page("about:blank").await {
            Ok(page) => self.capture(&page, model_url, output_path, format).await,
            Err(e) => Err(RenderError::Browser(e)),
        };

        // Teardown on every exit path, including the deadline branch.
        if let Err(e) = browser.close().await {
            warn!("Failed to close rendering browser: {}", e);
        }
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }
}

/// Poll the viewer's status global until it reports load or error.
async fn wait_for_load(page: &Page, interval: Duration) -> RenderResult<()> {
    let probe = format!("{} || \"pending\"", STATUS_GLOBAL);
    loop {
        let status: String = page
            .evaluate(probe.as_str())
            .await?
            .into_value()
            .unwrap_or_else(|_| "pending".to_string());

        match status.as_str() {
            "loaded" => return Ok(()),
            s if s.starts_with("error:") => {
                return Err(RenderError::load_failed(
                    s.trim_start_matches("error:").to_string(),
                ))
            }
            _ => {}
        }
        tokio::time::sleep(interval).await;
    }
}

/// Race an attempt against the rendering deadline.
///
/// The loser is dropped; the deadline branch maps to `DeadlineExceeded`.
async fn run_with_deadline<F>(deadline: Duration, attempt: F) -> RenderResult<()>
where
    F: Future<Output = RenderResult<()>>,
{
    match tokio::time::timeout(deadline, attempt).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::DeadlineExceeded {
            secs: deadline.as_secs(),
        }),
    }
}
