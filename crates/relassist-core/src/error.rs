//! Error types for the relassist-core library.

use thiserror::Error;

/// Main error type for the relassist library.
#[derive(Error, Debug)]
pub enum RelassistError {
    /// Release version error.
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    /// Ticket payload error.
    #[error("ticket error: {0}")]
    Ticket(#[from] TicketError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to release version handling.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    /// The version string is not `major.minor.patch`.
    #[error("malformed release version: {0:?}")]
    Malformed(String),

    /// The version has no earlier patch release to compare against.
    #[error("no previous release before {0}")]
    NoPrevious(String),
}

/// Errors related to Jira ticket payloads.
#[derive(Error, Debug)]
pub enum TicketError {
    /// The issue offers no transition into the requested status.
    #[error("ticket {key} has no transition to status {status:?}")]
    NoTransition { key: String, status: String },

    /// No ticket matched the search.
    #[error("no ticket found: {0}")]
    NotFound(String),
}

/// Result type for the relassist library.
pub type Result<T> = std::result::Result<T, RelassistError>;
