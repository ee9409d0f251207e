//! Task intake from Redis.
//!
//! The platform API enqueues task ids by pushing them onto a Redis list;
//! the worker drains that list on the poll cadence and submits each id to
//! the scheduler. This keeps admission available while a session runs and
//! avoids linking the worker into the API process.

use std::sync::Arc;
use std::time::Duration;

use redis::AsyncCommands;
use tokio::sync::watch;
use tracing::{debug, warn};

use veloxi_models::TaskId;
use veloxi_queue::QueueResult;

use crate::scheduler::Scheduler;

/// Redis list drain feeding the scheduler.
pub struct RedisIntake {
    client: redis::Client,
    key: String,
    interval: Duration,
}

impl RedisIntake {
    /// Create an intake draining `key` every `interval`.
    pub fn new(redis_url: &str, key: impl Into<String>, interval: Duration) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            client,
            key: key.into(),
            interval,
        })
    }

    /// Drain the list until shutdown, submitting every id.
    pub async fn run(self, scheduler: Arc<Scheduler>, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = self.drain(&scheduler).await {
                        warn!("Intake drain failed: {}", e);
                        // Back off on Redis errors
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        }
    }

    async fn drain(&self, scheduler: &Scheduler) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        loop {
            let id: Option<String> = conn.lpop(&self.key, None).await?;
            let Some(id) = id else { break };

            debug!(task_id = %id, "Intake received task id");
            scheduler.submit(TaskId::from_string(id)).await;
        }

        Ok(())
    }
}
