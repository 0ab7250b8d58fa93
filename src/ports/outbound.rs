//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{BookingRecord, DomainError, SlotKey};

/// Persistence collaborator. Durably records a finalized booking.
#[async_trait::async_trait]
pub trait PersistencePort: Send + Sync {
    /// Record the flat booking fields. Must return an error on anything other
    /// than a verifiable acknowledgment — the orchestrator treats silence as
    /// failure, not success.
    async fn record(&self, record: &BookingRecord) -> Result<(), DomainError>;
}

/// Notification collaborator. Alerts a human operator.
#[async_trait::async_trait]
pub trait NotifierPort: Send + Sync {
    /// Deliver a formatted human-readable message to the operator channel.
    async fn notify_operator(&self, message: &str) -> Result<(), DomainError>;
}

/// Booked-slot index. Owned by the persistence side in production; the
/// availability path queries it and never iterates it.
#[async_trait::async_trait]
pub trait SlotIndexPort: Send + Sync {
    async fn is_booked(&self, key: &SlotKey) -> Result<bool, DomainError>;

    /// Commit a slot key. Called only after the submission reports full
    /// success; an abandoned flow must never reserve a slot.
    async fn mark_booked(&self, key: SlotKey) -> Result<(), DomainError>;
}
