//! Task admission queue and progress notifications.
//!
//! This crate provides:
//! - An in-memory FIFO queue with idempotent admission
//! - The `Notifier` contract for per-task progress events
//! - A Redis Pub/Sub notifier implementation

pub mod error;
pub mod progress;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use progress::{Notifier, ProgressChannel};
pub use queue::TaskQueue;
