//! In-memory store. Implements PersistencePort and SlotIndexPort for demos
//! and tests, with optional simulated latency.
//!
//! The booked index it carries can be seeded from config so the demo starts
//! with some slots already taken.

use crate::domain::clock::to_minutes;
use crate::domain::{BookedIndex, BookingRecord, DomainError, SlotKey};
use crate::ports::{PersistencePort, SlotIndexPort};
use chrono::NaiveDate;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory booking store and slot index.
pub struct InMemoryStore {
    records: RwLock<Vec<BookingRecord>>,
    index: RwLock<BookedIndex>,
    /// Simulated collaborator latency.
    delay: Duration,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_seed(BookedIndex::new())
    }

    pub fn with_seed(index: BookedIndex) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            index: RwLock::new(index),
            delay: Duration::from_millis(100),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn records(&self) -> Vec<BookingRecord> {
        self.records.read().await.clone()
    }

    pub async fn booked_count(&self) -> usize {
        self.index.read().await.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PersistencePort for InMemoryStore {
    async fn record(&self, record: &BookingRecord) -> Result<(), DomainError> {
        tokio::time::sleep(self.delay).await;
        self.records.write().await.push(record.clone());
        info!(client = %record.client_name, date = %record.date, "[MEM] booking recorded");
        Ok(())
    }
}

#[async_trait::async_trait]
impl SlotIndexPort for InMemoryStore {
    async fn is_booked(&self, key: &SlotKey) -> Result<bool, DomainError> {
        Ok(self.index.read().await.contains(key))
    }

    async fn mark_booked(&self, key: SlotKey) -> Result<(), DomainError> {
        self.index.write().await.insert(key);
        Ok(())
    }
}

/// Parses a seed list of taken slots, comma-separated "YYYY-MM-DD HH:MM"
/// entries. Malformed entries fail loudly rather than silently freeing a
/// slot that should be taken.
pub fn parse_seed(seed: &str) -> Result<BookedIndex, DomainError> {
    seed.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (date, time) = entry
                .split_once(' ')
                .ok_or_else(|| DomainError::Parse(format!("expected 'DATE HH:MM': {entry:?}")))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| DomainError::Parse(format!("bad date in {entry:?}: {e}")))?;
            let start_min = to_minutes(time)?;
            Ok(SlotKey { date, start_min })
        })
        .collect::<Result<BookedIndex, DomainError>>()
}
