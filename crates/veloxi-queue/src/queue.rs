//! In-memory FIFO task queue.

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing::debug;

use veloxi_models::TaskId;

/// FIFO admission queue for mesh tasks.
///
/// Admission is idempotent: a task id already waiting in the queue is not
/// appended a second time. A single mutex serializes caller-side `push`
/// against the scheduler's `pop`, so the sequence is race-free. Ordering
/// is strict FIFO with no priorities.
#[derive(Debug, Default)]
pub struct TaskQueue {
    entries: Mutex<VecDeque<TaskId>>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the tail unless it is already queued.
    ///
    /// Returns `true` when the id was admitted, `false` for a duplicate.
    pub async fn push(&self, id: TaskId) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.contains(&id) {
            debug!(task_id = %id, "Duplicate enqueue ignored");
            return false;
        }
        entries.push_back(id);
        true
    }

    /// Pop and return the head id, or `None` when the queue is empty.
    pub async fn pop(&self) -> Option<TaskId> {
        self.entries.lock().await.pop_front()
    }

    /// Number of queued ids.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the queue holds no ids.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Whether `id` is currently waiting in the queue.
    pub async fn contains(&self, id: &TaskId) -> bool {
        self.entries.lock().await.contains(id)
    }
}
