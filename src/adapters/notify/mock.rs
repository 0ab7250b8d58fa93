//! Mock notifier for running without an operator channel.
//!
//! Logs the message instead of delivering it. Simulates network latency with
//! a configurable delay and can be forced to fail for exercising the retry
//! path.

use crate::domain::DomainError;
use crate::ports::NotifierPort;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Mock notification collaborator.
pub struct MockNotifier {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail: AtomicBool,
    deliveries: AtomicUsize,
}

impl MockNotifier {
    /// Create a new mock notifier with default delay (100ms).
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: AtomicBool::new(false),
            deliveries: AtomicUsize::new(0),
        }
    }

    /// Force every subsequent delivery to fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NotifierPort for MockNotifier {
    async fn notify_operator(&self, message: &str) -> Result<(), DomainError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Notify("[MOCK] operator channel down".into()));
        }

        self.deliveries.fetch_add(1, Ordering::SeqCst);
        info!(len = message.len(), "[MOCK] operator notified:\n{message}");
        Ok(())
    }
}
