//! Streaming asset download.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub type DownloadResult<T> = Result<T, DownloadError>;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Download failed with status {status}")]
    Status { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract for fetching a remote resource to a local path.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetch `url` into `local_path`, creating parent directories.
    ///
    /// The returned path is only yielded after the local write completed,
    /// so a resolved call never leaves a partially written file behind.
    async fn fetch(&self, url: &str, local_path: &Path) -> DownloadResult<PathBuf>;
}

/// HTTP downloader streaming response bodies to disk.
///
/// Bodies are written chunk by chunk so large model files never sit in
/// memory whole.
pub struct HttpDownloader {
    http: reqwest::Client,
}

impl HttpDownloader {
    /// Create a downloader with connection tuning for large assets.
    pub fn new() -> DownloadResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("veloxi-worker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str, local_path: &Path) -> DownloadResult<PathBuf> {
        debug!(%url, local = %local_path.display(), "Downloading asset");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
            });
        }

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::File::create(local_path).await?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(local_path.to_path_buf())
    }
}
