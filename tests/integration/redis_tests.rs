//! Redis progress channel integration tests.

use futures_util::StreamExt;
use std::time::Duration;

use veloxi_models::{TaskId, TaskPhase};
use veloxi_queue::{Notifier, ProgressChannel};

/// Test Redis connection and progress publish.
#[tokio::test]
#[ignore = "requires Redis"]
async fn test_progress_publish() {
    dotenvy::dotenv().ok();

    let channel = ProgressChannel::from_env().expect("Failed to create progress channel");
    channel
        .send(
            &TaskId::from("integration-test"),
            TaskPhase::Waiting,
            "Still processing Rodin model...",
        )
        .await
        .expect("Failed to publish progress event");
}

/// Test the publish/subscribe cycle for one task.
#[tokio::test]
#[ignore = "requires Redis"]
async fn test_progress_roundtrip() {
    dotenvy::dotenv().ok();

    let task_id = TaskId::new();
    let channel = ProgressChannel::from_env().expect("Failed to create progress channel");
    let mut events = channel
        .subscribe(&task_id)
        .await
        .expect("Failed to subscribe");

    // Give the subscription a moment to register before publishing.
    tokio::time::sleep(Duration::from_millis(200)).await;
    channel
        .send(&task_id, TaskPhase::Queued, "Rodin task added to queue.")
        .await
        .expect("Failed to publish");

    let event = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .expect("Timed out waiting for event")
        .expect("Subscription closed");

    assert_eq!(event.task_id, task_id);
    assert_eq!(event.phase, TaskPhase::Queued);
    println!("Received event: {}", event.message);
}
