//! Application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use nimbus_workflow::AccessWorkflow;

/// State shared across handlers.
pub struct AppState {
    pub workflow: Arc<AccessWorkflow>,
    start_time: Instant,
    delivery_count: AtomicU64,
}

impl AppState {
    pub fn new(workflow: Arc<AccessWorkflow>) -> Self {
        Self {
            workflow,
            start_time: Instant::now(),
            delivery_count: AtomicU64::new(0),
        }
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Webhook deliveries received since startup.
    pub fn delivery_count(&self) -> u64 {
        self.delivery_count.load(Ordering::Relaxed)
    }

    pub fn record_delivery(&self) {
        self.delivery_count.fetch_add(1, Ordering::Relaxed);
    }
}
