//! Progress notifications via Redis Pub/Sub.

use async_trait::async_trait;
use tracing::debug;

use veloxi_models::{ProgressMessage, TaskId, TaskPhase};

use crate::error::QueueResult;

/// Contract for pushing per-task progress events.
///
/// Implementations must preserve send order for a given task id; callers
/// treat delivery as best-effort and never fail a task on notifier errors.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a phase transition with a human-readable message.
    async fn send(&self, task_id: &TaskId, phase: TaskPhase, message: &str) -> QueueResult<()>;
}

/// Channel publishing progress events to Redis Pub/Sub.
pub struct ProgressChannel {
    client: redis::Client,
}

impl ProgressChannel {
    /// Create a new progress channel.
    pub fn new(redis_url: &str) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Create from the `REDIS_URL` environment variable.
    pub fn from_env() -> QueueResult<Self> {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        Self::new(&redis_url)
    }

    /// Get the channel name for a task.
    pub fn channel_name(task_id: &TaskId) -> String {
        format!("progress:mesh:{}", task_id)
    }

    /// Subscribe to progress events for a task.
    /// Returns a pinned stream that can be polled with `.next()`.
    pub async fn subscribe(
        &self,
        task_id: &TaskId,
    ) -> QueueResult<std::pin::Pin<Box<dyn futures_util::Stream<Item = ProgressMessage> + Send>>>
    {
        use futures_util::StreamExt;

        let mut pubsub = self.client.get_async_pubsub().await?;
        let channel = Self::channel_name(task_id);

        pubsub.subscribe(&channel).await?;

        let stream = pubsub.into_on_message().filter_map(|msg| async move {
            let payload: String = msg.get_payload().ok()?;
            serde_json::from_str(&payload).ok()
        });

        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl Notifier for ProgressChannel {
    async fn send(&self, task_id: &TaskId, phase: TaskPhase, message: &str) -> QueueResult<()> {
        use redis::AsyncCommands;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let channel = Self::channel_name(task_id);
        let event = ProgressMessage::now(task_id.clone(), phase, message);
        let payload = serde_json::to_string(&event)?;

        debug!(task_id = %task_id, phase = phase.as_str(), "Publishing progress event");
        conn.publish::<_, _, ()>(channel, payload).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name() {
        let task = TaskId::from_string("t42");
        assert_eq!(ProgressChannel::channel_name(&task), "progress:mesh:t42");
    }
}
