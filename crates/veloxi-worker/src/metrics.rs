//! Prometheus metrics for the worker.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Metric names as constants for consistency.
pub mod names {
    pub const TASKS_ENQUEUED_TOTAL: &str = "veloxi_tasks_enqueued_total";
    pub const TASKS_COMPLETED_TOTAL: &str = "veloxi_tasks_completed_total";
    pub const TASKS_FAILED_TOTAL: &str = "veloxi_tasks_failed_total";
    pub const QUEUE_LENGTH: &str = "veloxi_queue_length";
    pub const THUMBNAILS_RENDERED_TOTAL: &str = "veloxi_thumbnails_rendered_total";
}

/// Install the Prometheus recorder, serving scrapes when `addr` is set.
pub fn init_metrics(addr: Option<SocketAddr>) {
    let result = match addr {
        Some(addr) => PrometheusBuilder::new().with_http_listener(addr).install(),
        None => PrometheusBuilder::new()
            .install_recorder()
            .map(|_handle| ()),
    };
    result.expect("Failed to install Prometheus recorder");
}

/// Record task admission.
pub fn record_enqueued() {
    counter!(names::TASKS_ENQUEUED_TOTAL).increment(1);
}

/// Record a successfully completed task.
pub fn record_completed() {
    counter!(names::TASKS_COMPLETED_TOTAL).increment(1);
}

/// Record a failed task with the terminal reason.
pub fn record_failed(reason: &str) {
    let labels = [("reason", reason.to_string())];
    counter!(names::TASKS_FAILED_TOTAL, &labels).increment(1);
}

/// Record queue length.
pub fn record_queue_length(length: usize) {
    gauge!(names::QUEUE_LENGTH).set(length as f64);
}

/// Record a thumbnail render outcome.
pub fn record_thumbnail(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::THUMBNAILS_RENDERED_TOTAL, &labels).increment(1);
}
