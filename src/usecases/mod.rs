//! Application use cases. Orchestrate domain logic via ports.

pub mod booking_flow;
pub mod submission;

pub use booking_flow::{BookingFlow, FlowState};
pub use submission::SubmissionService;
