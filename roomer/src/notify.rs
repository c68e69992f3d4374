//! Booking lifecycle notifications.
//!
//! The engine emits an event after each committed state change. Delivery
//! is best-effort: a failed notification is logged and never rolls back
//! the booking.

use crate::booking::Booking;
use crate::error::Result;

/// A committed change to a booking.
#[derive(Debug, Clone, Copy)]
pub enum BookingEvent<'a> {
    /// A booking was created.
    Created(&'a Booking),
    /// A booking was cancelled.
    Cancelled(&'a Booking),
    /// A booking moved to new dates.
    Rescheduled(&'a Booking),
}

/// Receiver for booking lifecycle events.
pub trait Notifier {
    /// Delivers a booking event.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the caller treats this as
    /// non-fatal.
    fn notify(&self, event: &BookingEvent<'_>) -> Result<()>;
}

/// Notifier that writes events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &BookingEvent<'_>) -> Result<()> {
        match event {
            BookingEvent::Created(booking) => {
                log::info!(
                    "booking {} created: room {} {}",
                    booking.id(),
                    booking.room_id(),
                    booking.dates()
                );
            }
            BookingEvent::Cancelled(booking) => {
                log::info!("booking {} cancelled", booking.id());
            }
            BookingEvent::Rescheduled(booking) => {
                log::info!(
                    "booking {} rescheduled to {}",
                    booking.id(),
                    booking.dates()
                );
            }
        }
        Ok(())
    }
}

/// Notifier that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &BookingEvent<'_>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Booking, DateRange};
    use chrono::{TimeZone, Utc};

    fn sample_booking() -> Booking {
        let dates = DateRange::new(
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 3, 0, 0, 0).unwrap(),
        )
        .unwrap();
        Booking::builder(1, 101, dates).build()
    }

    #[test]
    fn test_log_notifier_never_fails() {
        let booking = sample_booking();
        let notifier = LogNotifier;
        assert!(notifier.notify(&BookingEvent::Created(&booking)).is_ok());
        assert!(notifier.notify(&BookingEvent::Cancelled(&booking)).is_ok());
        assert!(notifier.notify(&BookingEvent::Rescheduled(&booking)).is_ok());
    }

    #[test]
    fn test_null_notifier_discards() {
        let booking = sample_booking();
        assert!(NullNotifier.notify(&BookingEvent::Created(&booking)).is_ok());
    }
}
