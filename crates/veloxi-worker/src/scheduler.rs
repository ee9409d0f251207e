//! Task scheduling loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

use veloxi_models::{TaskId, TaskPhase};
use veloxi_queue::TaskQueue;

use crate::metrics;
use crate::processor::{ProcessingContext, TaskProcessor};

/// Scheduler owning the admission queue and the processing slot.
///
/// A semaphore guards the worker slots instead of a boolean flag, so
/// widening to concurrent sessions is a configuration change rather than
/// a rearchitecture. The default is a single slot: strictly serial
/// processing across tasks.
pub struct Scheduler {
    ctx: Arc<ProcessingContext>,
    queue: Arc<TaskQueue>,
    slots: Arc<Semaphore>,
    shutdown: watch::Sender<bool>,
}

impl Scheduler {
    /// Create a scheduler around the shared processing context.
    pub fn new(ctx: Arc<ProcessingContext>) -> Self {
        let slots = Arc::new(Semaphore::new(ctx.config.max_concurrent_tasks));
        let (shutdown, _) = watch::channel(false);

        Self {
            ctx,
            queue: Arc::new(TaskQueue::new()),
            slots,
            shutdown,
        }
    }

    /// Admit a task id for processing.
    ///
    /// Admission is idempotent: a duplicate of an id already waiting in
    /// the queue is a silent no-op with no second `queued` notification.
    /// Callers may submit at any time, including while a session runs.
    pub async fn submit(&self, task_id: TaskId) {
        if !self.queue.push(task_id.clone()).await {
            return;
        }

        metrics::record_enqueued();
        metrics::record_queue_length(self.queue.len().await);
        info!(task_id = %task_id, "Task admitted to queue");

        if let Err(e) = self
            .ctx
            .notifier
            .send(&task_id, TaskPhase::Queued, "Rodin task added to queue.")
            .await
        {
            warn!(task_id = %task_id, "Queued notification failed: {}", e);
        }
    }

    /// Receiver for the scheduler's shutdown signal.
    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Run the scheduling loop until shutdown.
    ///
    /// Wakes on the poll cadence; when a slot is free, pops the head id
    /// and spawns a processing session holding the slot permit. The head
    /// task keeps its queue position while the slot is busy.
    pub async fn run(&self) {
        info!(
            slots = self.ctx.config.max_concurrent_tasks,
            "Scheduler started"
        );

        let mut shutdown_rx = self.shutdown.subscribe();
        let mut interval = tokio::time::interval(self.ctx.config.poll_interval);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping scheduler");
                        break;
                    }
                }
                _ = interval.tick() => {
                    let Ok(permit) = Arc::clone(&self.slots).try_acquire_owned() else {
                        continue;
                    };
                    let Some(task_id) = self.queue.pop().await else {
                        drop(permit);
                        continue;
                    };

                    metrics::record_queue_length(self.queue.len().await);

                    let ctx = Arc::clone(&self.ctx);
                    let cancel = self.shutdown.subscribe();
                    tokio::spawn(async move {
                        let _permit = permit;
                        TaskProcessor::new(task_id, ctx, cancel).run().await;
                    });
                }
            }
        }

        info!("Waiting for in-flight session to finish...");
        let _ = tokio::time::timeout(self.ctx.config.shutdown_timeout, self.wait_idle()).await;
        info!("Scheduler stopped");
    }

    /// Signal shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Wait until every slot permit is free again.
    async fn wait_idle(&self) {
        loop {
            if self.slots.available_permits() == self.ctx.config.max_concurrent_tasks {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
