//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("time parse error: {0}")]
    Parse(String),

    #[error("minute offset out of range: {0}")]
    Range(String),

    /// Per-field validation failures. Blocks step advance; the user corrects
    /// the named fields and retries.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("persistence collaborator error: {0}")]
    Persistence(String),

    #[error("notification collaborator error: {0}")]
    Notify(String),

    /// A collaborator did not answer within the submission deadline.
    #[error("collaborator timed out: {0}")]
    Timeout(String),

    /// Illegal state-machine transition or unmet step guard.
    #[error("flow error: {0}")]
    Flow(String),
}

/// One validation failure, addressed to a specific input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
