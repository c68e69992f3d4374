//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test modules.

use chrono::{DateTime, TimeZone, Utc};
use tempfile::tempdir;

use crate::booking::DateRange;
use crate::database::{Database, DatabaseConfig};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Returns midnight UTC on the given day of January 2030.
///
/// Test dates are placed far in the future so that reschedule protection
/// windows computed from the real clock never interfere.
///
/// # Panics
///
/// Panics if the day is not a valid calendar day.
#[must_use]
pub fn days(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, day, 0, 0, 0).unwrap()
}

/// Creates a date range spanning the given days of January 2030.
///
/// # Panics
///
/// Panics if the range would be inverted or empty.
#[must_use]
pub fn test_range(start_day: u32, end_day: u32) -> DateRange {
    DateRange::new(days(start_day), days(end_day)).unwrap()
}
