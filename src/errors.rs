//! Unified error types for the flight service.
//!
//! Store operations return [`Error`]; the HTTP layer only looks at
//! [`Error::kind`] to pick a status code.

use thiserror::Error;

/// Coarse classification of an [`Error`], used to map failures onto HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The addressed flight does not exist.
    NotFound,
    /// The caller sent something the store refuses to persist.
    Validation,
    /// Database, configuration or I/O failure.
    Internal,
}

/// Every failure the service can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Underlying database driver failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No flight is stored under this id
    #[error("Flight not found: {id}")]
    FlightNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// A required flight field is absent, null or blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Wire name of the field
        field: &'static str,
    },

    /// Fare is negative, NaN, infinite or not a number at all
    #[error("Invalid fare: {value}")]
    InvalidFare {
        /// The rejected input
        value: String,
    },

    /// Date is neither a known date format nor a valid epoch timestamp
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Any other malformed input (bad id, unreadable request body)
    #[error("Invalid request: {message}")]
    Validation {
        /// Description of the problem
        message: String,
    },
}

impl Error {
    /// Returns the kind used by the HTTP layer to choose a status code.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FlightNotFound { .. } => ErrorKind::NotFound,
            Self::MissingField { .. }
            | Self::InvalidFare { .. }
            | Self::InvalidDate { .. }
            | Self::Validation { .. } => ErrorKind::Validation,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
