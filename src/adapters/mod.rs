//! Infrastructure adapters. Implement the ports.
//!
//! HTTP collaborators, in-memory store, terminal UI. Map errors to
//! DomainError.

pub mod notify;
pub mod persistence;
pub mod ui;
