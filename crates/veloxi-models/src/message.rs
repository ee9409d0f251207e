//! Progress message schema.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::task::{TaskId, TaskPhase};

/// Human-readable progress event for one task.
///
/// Consumers treat the per-task stream as a sequential progress log, so
/// messages must be published in state-machine order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProgressMessage {
    /// Task the event belongs to
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
    /// Lifecycle phase that was entered
    pub phase: TaskPhase,
    /// Short human-readable description
    pub message: String,
    /// Emission timestamp
    pub timestamp: DateTime<Utc>,
}

impl ProgressMessage {
    /// Create a message stamped with the current time.
    pub fn now(task_id: TaskId, phase: TaskPhase, message: impl Into<String>) -> Self {
        Self {
            task_id,
            phase,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
