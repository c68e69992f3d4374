//! Error types for the roomer library.
//!
//! This module provides the error hierarchy for all booking operations,
//! using `thiserror` for ergonomic error handling.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for operations that may fail with a roomer error.
///
/// # Examples
///
/// ```
/// use roomer::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roomer library.
///
/// This enum encompasses all possible error conditions that can occur
/// during booking operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A date range whose start is not strictly before its end.
    #[error("invalid date range: start {start} is not before end {end}")]
    InvalidDateRange {
        /// The requested start of the range.
        start: DateTime<Utc>,
        /// The requested end of the range.
        end: DateTime<Utc>,
    },

    /// The room has an active booking overlapping the requested dates.
    #[error("room {room_id} not available for the requested dates")]
    RoomNotAvailable {
        /// The room that was requested.
        room_id: u64,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An operation was attempted on a cancelled booking.
    #[error("booking {id} is cancelled")]
    BookingCancelled {
        /// The identifier of the cancelled booking.
        id: u64,
    },

    /// A reschedule was attempted inside the protection window before the
    /// booking's current start date.
    #[error("booking {id} starts at {start} and can no longer be rescheduled")]
    RescheduleTooLate {
        /// The identifier of the protected booking.
        id: u64,
        /// The booking's current start date.
        start: DateTime<Utc>,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Additional conversions for better ergonomics

impl From<crate::booking::InvalidDateRangeError> for Error {
    fn from(err: crate::booking::InvalidDateRangeError) -> Self {
        Self::InvalidDateRange {
            start: err.start,
            end: err.end,
        }
    }
}

impl From<crate::booking::ValidationError> for Error {
    fn from(err: crate::booking::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a missing booking or guest.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomer::Error;
    ///
    /// let err = Error::NotFound { resource: "booking 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error indicates a date conflict on the requested room.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomer::Error;
    ///
    /// let err = Error::RoomNotAvailable { room_id: 101 };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomNotAvailable { .. })
    }

    /// Check if error is caller-fixable (bad input rather than system state).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. } | Self::Validation { .. }
        )
    }
}
