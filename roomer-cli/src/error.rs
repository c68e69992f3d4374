//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use roomer::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Booking rule violation (conflict, missing, cancelled, too late)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::RoomNotAvailable { .. }
                | LibError::NotFound { .. }
                | LibError::BookingCancelled { .. }
                | LibError::RescheduleTooLate { .. } => 1,
                LibError::InvalidDateRange { .. } | LibError::Validation { .. } => 4,
                LibError::Configuration(_) => 7,
                LibError::Io(_) => 5,
                _ => 6,
            },
            CliError::Timeout => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (use --data-dir or run 'roomer init')"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        // A busy database surfaces as a timeout rather than a generic
        // library failure
        if let LibError::Database(rusqlite_err) = &e {
            if let Some(code) = sqlite_error_code(rusqlite_err) {
                if code == rusqlite::ErrorCode::DatabaseBusy
                    || code == rusqlite::ErrorCode::DatabaseLocked
                {
                    return CliError::Timeout;
                }
            }
        }
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

fn sqlite_error_code(e: &rusqlite::Error) -> Option<rusqlite::ErrorCode> {
    match e {
        rusqlite::Error::SqliteFailure(err, _) => Some(err.code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::Library(LibError::RoomNotAvailable { room_id: 101 }).exit_code(),
            1
        );
        assert_eq!(
            CliError::Library(LibError::NotFound {
                resource: "booking 7".into()
            })
            .exit_code(),
            1
        );
        assert_eq!(CliError::Timeout.exit_code(), 2);
        assert_eq!(CliError::NoDataDirectory.exit_code(), 3);
        assert_eq!(CliError::InvalidArguments("bad".into()).exit_code(), 4);
        assert_eq!(
            CliError::Io(std::io::Error::other("io")).exit_code(),
            5
        );
        assert_eq!(CliError::Config("bad".into()).exit_code(), 7);
    }

    #[test]
    fn test_validation_errors_are_invalid_arguments() {
        let err = CliError::Library(LibError::Validation {
            field: "guest name".into(),
            message: "must not be empty".into(),
        });
        assert_eq!(err.exit_code(), 4);
    }
}
