//! Mesh generation task worker.
//!
//! This crate provides:
//! - The task processing state machine (poll, classify, download, render,
//!   persist, notify)
//! - A scheduler serializing sessions through a slot semaphore
//! - Streaming asset download
//! - Redis list intake for task admission
//! - Graceful shutdown

pub mod config;
pub mod download;
pub mod error;
pub mod intake;
pub mod metrics;
pub mod processor;
pub mod scheduler;

#[cfg(test)]
mod testutil;

pub use config::WorkerConfig;
pub use download::{DownloadError, Downloader, HttpDownloader};
pub use error::{WorkerError, WorkerResult};
pub use intake::RedisIntake;
pub use processor::{ProcessingContext, TaskProcessor};
pub use scheduler::Scheduler;
