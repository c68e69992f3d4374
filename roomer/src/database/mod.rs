//! Database layer for persistent storage of bookings, guests, and rooms.
//!
//! This module provides a SQLite-based storage layer for the booking
//! system, including connection management, schema versioning, and CRUD
//! operations. The no-double-booking invariant is enforced here: save
//! and update operations re-run the availability predicate inside their
//! write transactions before committing.
//!
//! # Examples
//!
//! ```no_run
//! use roomer::database::{Database, DatabaseConfig};
//! use roomer::{DateRange, NewBooking};
//! use chrono::{TimeZone, Utc};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/roomer.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a booking
//! let dates = DateRange::new(
//!     Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
//! ).unwrap();
//! let booking = db.save_booking(&NewBooking::new(101, dates)).unwrap();
//!
//! // List all bookings
//! let all = db.list_all_bookings().unwrap();
//! for booking in all {
//!     println!("{:?}", booking);
//! }
//! ```

mod bookings;
mod config;
mod connection;
mod guests;
pub mod migrations;
mod rooms;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
