//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod entities;
pub mod errors;
pub mod validation;

pub use calendar::{BusinessCalendar, BusinessDay};
pub use catalog::ServiceCatalog;
pub use entities::{
    BookedIndex, BookingDraft, BookingRecord, ConfirmedBooking, Customer, Service, ServiceId,
    Slot, SlotKey,
};
pub use errors::{DomainError, FieldError};
