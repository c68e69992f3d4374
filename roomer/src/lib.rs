#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roomer
//!
//! A library for managing hotel room bookings.
//!
//! This library provides core types and functionality for creating,
//! cancelling, and rescheduling room bookings while guaranteeing that a
//! room is never double-booked, together with a shared guest directory
//! and a room catalog.
//!
//! ## Core Types
//!
//! - [`BookingEngine`]: Validation, availability, and lifecycle rules
//! - [`Booking`], [`DateRange`], [`BookingStatus`]: The booking domain model
//! - [`Guest`] and [`GuestName`]: The deduplicated guest directory
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use roomer::DateRange;
//!
//! // Stays are half-open intervals: checkout day is free for the next guest
//! let day = |d| Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap();
//! let first = DateRange::new(day(1), day(5)).unwrap();
//! let second = DateRange::new(day(5), day(8)).unwrap();
//! assert!(!first.overlaps(&second));
//! ```

pub mod booking;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod guest;
pub mod logging;
pub mod notify;
pub mod room;
pub mod store;

// Re-export key types at crate root for convenience
pub use booking::{
    Booking, BookingBuilder, BookingRequest, BookingStatus, DateRange, InvalidDateRangeError,
    NewBooking, PaymentStatus, ValidationError,
};
pub use config::Config;
pub use database::{Database, DatabaseConfig};
pub use engine::{BookingEngine, Clock, SystemClock, DEFAULT_RESCHEDULE_WINDOW_DAYS};
pub use error::{Error, Result};
pub use guest::{Guest, GuestName, MAX_GUEST_NAME_LEN};
pub use logging::{init_logger, LogLevel, Logger};
pub use notify::{BookingEvent, LogNotifier, Notifier, NullNotifier};
pub use room::{NewRoom, Room};
pub use store::{BookingStore, GuestDirectory};
