//! Storage traits consumed by the booking engine.
//!
//! The engine is written against these traits rather than the concrete
//! [`Database`](crate::database::Database) so that its check ordering can
//! be tested with mock stores.

use crate::booking::{Booking, DateRange, NewBooking};
use crate::database::Database;
use crate::error::Result;
use crate::guest::{Guest, GuestName};

/// Persistence operations for bookings.
///
/// Implementations must make `save` and `update` atomic with respect to
/// the availability predicate: a booking that would overlap another
/// active booking on the same room must never be committed, even when
/// the caller's earlier `is_room_available` check raced with a
/// concurrent writer.
pub trait BookingStore {
    /// Checks whether a room is free of active bookings over a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn is_room_available(&self, room_id: u64, dates: &DateRange) -> Result<bool>;

    /// Checks whether a booking could move to new dates on its own room,
    /// ignoring the booking itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn can_reschedule(&self, booking_id: u64, dates: &DateRange) -> Result<bool>;

    /// Persists a new booking together with its guest links.
    ///
    /// # Errors
    ///
    /// Returns an error if the dates conflict with another active booking
    /// or if the underlying storage fails.
    fn save(&mut self, booking: &NewBooking) -> Result<Booking>;

    /// Retrieves a booking by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_by_id(&self, id: u64) -> Result<Option<Booking>>;

    /// Persists changes to an existing booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist, if the updated
    /// dates conflict with another active booking, or if the underlying
    /// storage fails.
    fn update(&mut self, booking: &Booking) -> Result<Booking>;
}

/// Find-or-create access to the guest directory.
pub trait GuestDirectory {
    /// Resolves a guest name to its directory entry, creating the entry
    /// if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_or_create(&mut self, name: &GuestName) -> Result<Guest>;
}

impl BookingStore for Database {
    fn is_room_available(&self, room_id: u64, dates: &DateRange) -> Result<bool> {
        Self::is_room_available(self, room_id, dates)
    }

    fn can_reschedule(&self, booking_id: u64, dates: &DateRange) -> Result<bool> {
        Self::can_reschedule(self, booking_id, dates)
    }

    fn save(&mut self, booking: &NewBooking) -> Result<Booking> {
        self.save_booking(booking)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Booking>> {
        self.find_booking(id)
    }

    fn update(&mut self, booking: &Booking) -> Result<Booking> {
        self.update_booking(booking)
    }
}

impl GuestDirectory for Database {
    fn find_or_create(&mut self, name: &GuestName) -> Result<Guest> {
        self.find_or_create_guest(name)
    }
}
