//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the UI drives the booking flow end to end.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run one interactive booking session (service -> slot -> details ->
    /// confirm). Returns when the flow reaches a terminal state or the user
    /// abandons it.
    async fn run(&self) -> Result<(), DomainError>;
}
