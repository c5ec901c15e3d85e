//! Error types for Roster
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Unified error type for Roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Student ID already exists: {0}")]
    DuplicateKey(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Invalid age: {0:?} is not a whole number")]
    InvalidAge(String),
}

impl RosterError {
    /// True for errors raised by the backing file rather than by user input
    pub fn is_storage(&self) -> bool {
        matches!(self, RosterError::Io(_) | RosterError::Serialization(_))
    }
}
