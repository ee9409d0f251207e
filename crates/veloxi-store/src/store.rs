//! Result store contract.

use async_trait::async_trait;

use veloxi_models::{MeshState, TaskId};

use crate::error::StoreResult;
use crate::types::{MeshCompletion, MeshRecord, NewTexture};

/// Persistence contract for mesh task results.
///
/// Updates are keyed by task id; texture attachment uses the internal
/// result identity returned by `complete`. Implementations serialize
/// their own writes, so future concurrent sessions (distinct task ids)
/// can share one instance.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Write a terminal lifecycle state for the task.
    async fn update_state(&self, task_id: &TaskId, state: MeshState) -> StoreResult<()>;

    /// Persist a successful completion and return the stored record.
    async fn complete(
        &self,
        task_id: &TaskId,
        completion: &MeshCompletion,
    ) -> StoreResult<MeshRecord>;

    /// Attach a texture record to a mesh result.
    async fn add_texture(&self, mesh_id: &str, texture: &NewTexture) -> StoreResult<()>;
}
