//! Task identity and lifecycle types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a mesh generation task.
///
/// The same id names the remote Rodin job, the persisted mesh record,
/// the queue entry, and the progress channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Generate a new random task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Terminal state persisted for a mesh record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MeshState {
    /// Generation finished and assets are stored
    Succeeded,
    /// Generation failed, timed out, or errored fatally
    Failed,
}

impl MeshState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshState::Succeeded => "succeeded",
            MeshState::Failed => "failed",
        }
    }
}

/// Observable lifecycle phase of a task, surfaced through the notifier.
///
/// Phases are a progress log, not persisted state; only `MeshState`
/// reaches the result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskPhase {
    /// Task admitted to the queue
    Queued,
    /// Worker picked the task up
    Processing,
    /// Remote job still running, poll will retry
    Waiting,
    /// Job finished, downloading produced assets
    Downloading,
    /// No preview image available, rendering a thumbnail
    GeneratingThumbnail,
    /// Thumbnail rendered
    GeneratingThumbnailDone,
    /// Thumbnail render failed, falling back to placeholder
    GeneratingThumbnailFailed,
    /// Task completed successfully
    Done,
    /// Total task duration exceeded
    Timeout,
    /// Fatal errors persisted past the error window
    FatalTimeout,
    /// Fatal error observed on a poll
    Error,
}

impl TaskPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPhase::Queued => "queued",
            TaskPhase::Processing => "processing",
            TaskPhase::Waiting => "waiting",
            TaskPhase::Downloading => "downloading",
            TaskPhase::GeneratingThumbnail => "generating_thumbnail",
            TaskPhase::GeneratingThumbnailDone => "generating_thumbnail_done",
            TaskPhase::GeneratingThumbnailFailed => "generating_thumbnail_failed",
            TaskPhase::Done => "done",
            TaskPhase::Timeout => "timeout",
            TaskPhase::FatalTimeout => "fatal_timeout",
            TaskPhase::Error => "error",
        }
    }

    /// Whether this phase ends the processing session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskPhase::Done | TaskPhase::Timeout | TaskPhase::FatalTimeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_roundtrip() {
        let id = TaskId::from_string("rodin-abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rodin-abc123\"");

        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(TaskPhase::Queued.as_str(), "queued");
        assert_eq!(
            TaskPhase::GeneratingThumbnailFailed.as_str(),
            "generating_thumbnail_failed"
        );
        assert_eq!(TaskPhase::FatalTimeout.as_str(), "fatal_timeout");
    }

    #[test]
    fn test_terminal_phases() {
        assert!(TaskPhase::Done.is_terminal());
        assert!(TaskPhase::Timeout.is_terminal());
        assert!(!TaskPhase::Waiting.is_terminal());
        assert!(!TaskPhase::Error.is_terminal());
    }

    #[test]
    fn test_mesh_state_serde() {
        assert_eq!(
            serde_json::to_string(&MeshState::Succeeded).unwrap(),
            "\"succeeded\""
        );
        assert_eq!(MeshState::Failed.as_str(), "failed");
    }
}
