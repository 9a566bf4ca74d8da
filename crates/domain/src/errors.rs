//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid WhatsApp conversation identifier
    #[error("Invalid WhatsApp ID: {0}")]
    InvalidWaId(String),

    /// Invalid visitor display name
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    /// Unrecognized widget anchor position
    #[error("Unknown widget position: {0}")]
    UnknownPosition(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
