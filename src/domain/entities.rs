//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/UI types here — these are mapped by adapters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Catalog key for a bookable consultation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Architecture,
    Interior,
    Plotting,
    General,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Architecture => "architecture",
            ServiceId::Interior => "interior",
            ServiceId::Plotting => "plotting",
            ServiceId::General => "general",
        }
    }
}

/// A bookable consultation kind. Immutable catalog entry; selecting one
/// copies duration/price into the draft so later catalog edits never touch
/// an in-progress booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub duration_min: u32,
    pub price: u32,
}

/// A candidate reservation window. Derived by the availability engine,
/// never stored. Two slots are equal iff same date and start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_min: u32,
    pub duration_min: u32,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.start_min == other.start_min
    }
}

impl Eq for Slot {}

impl Slot {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            start_min: self.start_min,
        }
    }
}

/// Key of a committed reservation: (date, start time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub start_min: u32,
}

/// Set of already-committed reservations. Queried, never iterated, by the
/// availability engine; grows only on confirmed success.
#[derive(Debug, Clone, Default)]
pub struct BookedIndex {
    keys: HashSet<SlotKey>,
}

impl BookedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: SlotKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<SlotKey> for BookedIndex {
    fn from_iter<I: IntoIterator<Item = SlotKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Customer contact and project details captured in the info step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub details: Option<String>,
    pub special_requests: Option<String>,
    pub newsletter_opt_in: bool,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// In-progress reservation, assembled across flow steps. One per session;
/// a step's fields are only read once that step has completed.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub service: Option<Service>,
    pub date: Option<NaiveDate>,
    pub start_min: Option<u32>,
    pub customer: Option<Customer>,
}

impl BookingDraft {
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.date.is_none()
            && self.start_min.is_none()
            && self.customer.is_none()
    }
}

/// The draft frozen at confirmation time. Immutable terminal artifact handed
/// to the submission orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedBooking {
    pub service: Service,
    pub date: NaiveDate,
    pub start_min: u32,
    pub customer: Customer,
    pub submitted_at: DateTime<Utc>,
}

impl ConfirmedBooking {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            start_min: self.start_min,
        }
    }
}

/// Flat named fields accepted by the persistence collaborator. Built by the
/// orchestrator from a [`ConfirmedBooking`]; serialized as a form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub service: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub price: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
    pub submitted_at: String,
}
