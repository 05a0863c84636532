//! Context error types

use thiserror::Error;

/// Errors raised while creating a GUI context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No font was supplied
    #[error("Context creation failed: no font supplied")]
    MissingFont,

    /// The injected allocator refused a reservation
    #[error("Allocator rejected {bytes} bytes for the {what}")]
    AllocationFailed { what: &'static str, bytes: usize },
}

/// Result type for context operations
pub type Result<T> = std::result::Result<T, ContextError>;
