//! Database CRUD operations for bookings.
//!
//! This module implements all create, read, update, and delete operations
//! for bookings, including the availability predicates that enforce the
//! no-double-booking invariant inside write transactions.

// Allow timestamp and rowid casts - we're converting between i64 (SQLite)
// and the u64/DateTime domain types.
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, TransactionBehavior};

use crate::booking::{Booking, BookingStatus, DateRange, NewBooking, PaymentStatus};
use crate::error::{Error, Result};

use super::connection::Database;
use super::schema::{
    COUNT_OVERLAPPING_BOOKINGS, COUNT_RESCHEDULE_CONFLICTS, INSERT_BOOKING, INSERT_BOOKING_GUEST,
};

/// Converts a `DateTime` to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a `DateTime`.
///
/// # Errors
///
/// Returns a conversion error if the value is outside the representable
/// range.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(crate::booking::ValidationError {
            field: "timestamp".into(),
            message: format!("value {secs} is out of range"),
        }))
    })
}

/// Helper function to deserialize a booking from a database row.
///
/// Expects row fields in this order: id, `room_id`, `start_date`,
/// `end_date`, comment, status, `payment_status`, `created_at`,
/// `updated_at`. Guests are loaded separately.
fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: u64 = row.get(0)?;
    let room_id: u64 = row.get(1)?;
    let start_secs: i64 = row.get(2)?;
    let end_secs: i64 = row.get(3)?;
    let comment: String = row.get(4)?;
    let status: String = row.get(5)?;
    let payment_status: String = row.get(6)?;
    let created_secs: i64 = row.get(7)?;
    let updated_secs: i64 = row.get(8)?;

    let dates = DateRange::new(
        unix_secs_to_datetime(start_secs)?,
        unix_secs_to_datetime(end_secs)?,
    )
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status = BookingStatus::parse(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let payment_status = PaymentStatus::parse(&payment_status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Booking::builder(id, room_id, dates)
        .comment(comment)
        .status(status)
        .payment_status(payment_status)
        .created_at(unix_secs_to_datetime(created_secs)?)
        .updated_at(unix_secs_to_datetime(updated_secs)?)
        .build())
}

// SQL statements for CRUD operations
const BOOKING_COLUMNS: &str =
    "id, room_id, start_date, end_date, comment, status, payment_status, created_at, updated_at";

const SELECT_BOOKING: &str = r"
    SELECT id, room_id, start_date, end_date, comment, status, payment_status, created_at, updated_at
    FROM bookings
    WHERE id = ?
";

const UPDATE_BOOKING: &str = r"
    UPDATE bookings
    SET room_id = ?, start_date = ?, end_date = ?, comment = ?,
        status = ?, payment_status = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_BOOKING: &str = "DELETE FROM bookings WHERE id = ?";

const DELETE_BOOKING_GUESTS: &str = "DELETE FROM booking_guests WHERE booking_id = ?";

impl Database {
    /// Saves a new booking and its guest links atomically.
    ///
    /// The availability predicate is re-evaluated inside the IMMEDIATE
    /// write transaction, so a conflicting booking committed between the
    /// caller's availability check and this call is still rejected. On
    /// success, the returned booking carries the assigned identifier and
    /// storage timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another active booking overlaps the requested dates
    /// - The transaction cannot be started or committed
    /// - Any insert fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roomer::database::{Database, DatabaseConfig};
    /// use roomer::{DateRange, NewBooking};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let config = DatabaseConfig::new("/tmp/roomer.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let dates = DateRange::new(
    ///     Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
    /// ).unwrap();
    ///
    /// let booking = db.save_booking(&NewBooking::new(101, dates)).unwrap();
    /// println!("created booking {}", booking.id());
    /// ```
    pub fn save_booking(&mut self, new: &NewBooking) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if new.status.is_active() {
            let conflicts: i64 = tx.query_row(
                COUNT_OVERLAPPING_BOOKINGS,
                params![
                    new.room_id,
                    datetime_to_unix_secs(new.dates.start()),
                    datetime_to_unix_secs(new.dates.end()),
                ],
                |row| row.get(0),
            )?;
            if conflicts > 0 {
                return Err(Error::RoomNotAvailable {
                    room_id: new.room_id,
                });
            }
        }

        let now = unix_secs_to_datetime(Utc::now().timestamp())?;
        let now_secs = datetime_to_unix_secs(now);

        tx.execute(
            INSERT_BOOKING,
            params![
                new.room_id,
                datetime_to_unix_secs(new.dates.start()),
                datetime_to_unix_secs(new.dates.end()),
                new.comment,
                new.status.as_str(),
                new.payment_status.as_str(),
                now_secs,
                now_secs,
            ],
        )?;
        let id = tx.last_insert_rowid() as u64;

        {
            let mut stmt = tx.prepare(INSERT_BOOKING_GUEST)?;
            for (position, guest) in new.guests.iter().enumerate() {
                stmt.execute(params![id, guest.id(), position as i64])?;
            }
        }

        tx.commit()?;

        let mut booking = Booking::builder(id, new.room_id, new.dates)
            .comment(new.comment.clone())
            .status(new.status)
            .payment_status(new.payment_status)
            .created_at(now)
            .updated_at(now)
            .build();
        booking.set_guests(new.guests.clone());
        Ok(booking)
    }

    /// Updates an existing booking's row.
    ///
    /// When the updated booking is still active, the availability
    /// predicate is re-evaluated inside the write transaction with the
    /// booking itself excluded, so a reschedule cannot land on dates
    /// claimed by another active booking. Guest links are replaced with
    /// the booking's current guest list in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No booking with this identifier exists
    /// - Another active booking overlaps the updated dates
    /// - The transaction cannot be started or committed
    pub fn update_booking(&mut self, booking: &Booking) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if booking.status().is_active() {
            let conflicts: i64 = tx.query_row(
                COUNT_RESCHEDULE_CONFLICTS,
                params![
                    booking.id(),
                    datetime_to_unix_secs(booking.dates().start()),
                    datetime_to_unix_secs(booking.dates().end()),
                ],
                |row| row.get(0),
            )?;
            if conflicts > 0 {
                return Err(Error::RoomNotAvailable {
                    room_id: booking.room_id(),
                });
            }
        }

        let now = unix_secs_to_datetime(Utc::now().timestamp())?;
        let rows = tx.execute(
            UPDATE_BOOKING,
            params![
                booking.room_id(),
                datetime_to_unix_secs(booking.dates().start()),
                datetime_to_unix_secs(booking.dates().end()),
                booking.comment(),
                booking.status().as_str(),
                booking.payment_status().as_str(),
                datetime_to_unix_secs(now),
                booking.id(),
            ],
        )?;
        if rows == 0 {
            return Err(Error::NotFound {
                resource: format!("booking {}", booking.id()),
            });
        }

        tx.execute(DELETE_BOOKING_GUESTS, params![booking.id()])?;
        {
            let mut stmt = tx.prepare(INSERT_BOOKING_GUEST)?;
            for (position, guest) in booking.guests().iter().enumerate() {
                stmt.execute(params![booking.id(), guest.id(), position as i64])?;
            }
        }

        tx.commit()?;

        let mut updated = Booking::builder(booking.id(), booking.room_id(), booking.dates())
            .comment(booking.comment())
            .status(booking.status())
            .payment_status(booking.payment_status())
            .created_at(booking.created_at())
            .updated_at(now)
            .build();
        updated.set_guests(booking.guests().to_vec());
        Ok(updated)
    }

    /// Retrieves a booking with its guests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(booking))` if the booking exists
    /// - `Ok(None)` if the booking doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn find_booking(&self, id: u64) -> Result<Option<Booking>> {
        match self
            .conn
            .query_row(SELECT_BOOKING, params![id], row_to_booking)
        {
            Ok(mut booking) => {
                booking.set_guests(Self::guests_for_booking(&self.conn, id)?);
                Ok(Some(booking))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all bookings with their guests, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_bookings(&self) -> Result<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id");
        self.query_bookings(&sql, [])
    }

    /// Lists all bookings for a room, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_bookings_by_room(&self, room_id: u64) -> Result<Vec<Booking>> {
        let sql =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = ? ORDER BY start_date");
        self.query_bookings(&sql, params![room_id])
    }

    /// Lists all bookings whose stay covers the given instant.
    ///
    /// A booking covers an instant when `start_date <= t < end_date`,
    /// matching the half-open interval convention.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_bookings_by_date(&self, date: DateTime<Utc>) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE start_date <= ?1 AND end_date > ?1
             ORDER BY room_id"
        );
        self.query_bookings(&sql, params![datetime_to_unix_secs(date)])
    }

    fn query_bookings<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Booking>> {
        let mut bookings = {
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt.query_map(params, row_to_booking)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        for booking in &mut bookings {
            let guests = Self::guests_for_booking(&self.conn, booking.id())?;
            booking.set_guests(guests);
        }
        Ok(bookings)
    }

    /// Deletes a booking and its guest links atomically.
    ///
    /// Returns whether a booking row was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or committed,
    /// or if any delete fails.
    pub fn delete_booking(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(DELETE_BOOKING_GUESTS, params![id])?;
        let rows = tx.execute(DELETE_BOOKING, params![id])?;

        tx.commit()?;
        Ok(rows > 0)
    }

    /// Checks whether a room is free of active bookings over a date range.
    ///
    /// This is a read-only fast check; the save and update operations
    /// repeat it inside their write transactions before committing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_room_available(&self, room_id: u64, dates: &DateRange) -> Result<bool> {
        let conflicts: i64 = self.conn.query_row(
            COUNT_OVERLAPPING_BOOKINGS,
            params![
                room_id,
                datetime_to_unix_secs(dates.start()),
                datetime_to_unix_secs(dates.end()),
            ],
            |row| row.get(0),
        )?;
        Ok(conflicts == 0)
    }

    /// Checks whether a booking could move to new dates on its own room.
    ///
    /// The booking itself is excluded from the conflict scan so that a
    /// reschedule overlapping its current stay is still allowed. An
    /// unknown booking identifier yields `true`; callers resolve the
    /// booking afterwards and report it missing there.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn can_reschedule(&self, booking_id: u64, dates: &DateRange) -> Result<bool> {
        let conflicts: i64 = self.conn.query_row(
            COUNT_RESCHEDULE_CONFLICTS,
            params![
                booking_id,
                datetime_to_unix_secs(dates.start()),
                datetime_to_unix_secs(dates.end()),
            ],
            |row| row.get(0),
        )?;
        Ok(conflicts == 0)
    }

    /// Loads the guests linked to a booking in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn guests_for_booking(
        conn: &Connection,
        booking_id: u64,
    ) -> Result<Vec<crate::guest::Guest>> {
        super::guests::guests_for_booking(conn, booking_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, days, test_range};
    use crate::guest::GuestName;

    #[test]
    fn test_save_and_find_round_trip() {
        let mut db = create_test_database();

        let alice = db
            .find_or_create_guest(&GuestName::new("Alice").unwrap())
            .unwrap();
        let bob = db
            .find_or_create_guest(&GuestName::new("Bob").unwrap())
            .unwrap();

        let draft = NewBooking::new(101, test_range(10, 15))
            .with_comment("sea view")
            .with_guests(vec![alice.clone(), bob.clone()]);
        let saved = db.save_booking(&draft).unwrap();

        let loaded = db.find_booking(saved.id()).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.room_id(), 101);
        assert_eq!(loaded.comment(), "sea view");
        assert_eq!(loaded.status(), BookingStatus::Pending);
        assert_eq!(loaded.payment_status(), PaymentStatus::Unpaid);
        assert_eq!(loaded.guests(), &[alice, bob]);
    }

    #[test]
    fn test_guest_order_preserved() {
        let mut db = create_test_database();

        let names = ["Zoe", "Alice", "Mallory"];
        let guests: Vec<_> = names
            .iter()
            .map(|n| db.find_or_create_guest(&GuestName::new(n).unwrap()).unwrap())
            .collect();

        let saved = db
            .save_booking(&NewBooking::new(101, test_range(1, 3)).with_guests(guests))
            .unwrap();

        let loaded = db.find_booking(saved.id()).unwrap().unwrap();
        let loaded_names: Vec<_> = loaded.guests().iter().map(|g| g.name().as_str()).collect();
        assert_eq!(loaded_names, names);
    }

    #[test]
    fn test_save_rejects_overlap() {
        let mut db = create_test_database();

        db.save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();

        let err = db
            .save_booking(&NewBooking::new(101, test_range(12, 20)))
            .unwrap_err();
        assert!(matches!(err, Error::RoomNotAvailable { room_id: 101 }));

        // Only the first booking exists
        assert_eq!(db.list_all_bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_save_allows_back_to_back() {
        let mut db = create_test_database();

        db.save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.save_booking(&NewBooking::new(101, test_range(15, 18)))
            .unwrap();

        assert_eq!(db.list_all_bookings().unwrap().len(), 2);
    }

    #[test]
    fn test_save_allows_other_room() {
        let mut db = create_test_database();

        db.save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.save_booking(&NewBooking::new(102, test_range(10, 15)))
            .unwrap();

        assert_eq!(db.list_all_bookings().unwrap().len(), 2);
    }

    #[test]
    fn test_cancelled_booking_does_not_block() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.update_booking(&booking.with_status(BookingStatus::Cancelled))
            .unwrap();

        assert!(db.is_room_available(101, &test_range(10, 15)).unwrap());
        db.save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
    }

    #[test]
    fn test_update_moves_dates() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        let moved = db
            .update_booking(&booking.clone().with_dates(test_range(20, 25)))
            .unwrap();

        assert_eq!(moved.dates(), test_range(20, 25));
        assert_eq!(moved.created_at(), booking.created_at());

        let loaded = db.find_booking(booking.id()).unwrap().unwrap();
        assert_eq!(loaded.dates(), test_range(20, 25));
    }

    #[test]
    fn test_update_can_overlap_own_dates() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();

        // Shifting by a few days overlaps the booking's own current stay
        db.update_booking(&booking.with_dates(test_range(12, 17)))
            .unwrap();
    }

    #[test]
    fn test_update_rejects_overlap_with_other_booking() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.save_booking(&NewBooking::new(101, test_range(20, 25)))
            .unwrap();

        let err = db
            .update_booking(&booking.with_dates(test_range(22, 27)))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_update_replaces_guest_links() {
        let mut db = create_test_database();

        let alice = db
            .find_or_create_guest(&GuestName::new("Alice").unwrap())
            .unwrap();
        let bob = db
            .find_or_create_guest(&GuestName::new("Bob").unwrap())
            .unwrap();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)).with_guests(vec![alice]))
            .unwrap();

        let mut changed = booking.clone();
        changed.set_guests(vec![bob.clone()]);
        db.update_booking(&changed).unwrap();

        let loaded = db.find_booking(booking.id()).unwrap().unwrap();
        assert_eq!(loaded.guests(), &[bob]);
    }

    #[test]
    fn test_update_not_found() {
        let mut db = create_test_database();

        let phantom = Booking::builder(999, 101, test_range(1, 3)).build();
        let err = db.update_booking(&phantom).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_booking_missing() {
        let db = create_test_database();
        assert!(db.find_booking(42).unwrap().is_none());
    }

    #[test]
    fn test_find_bookings_by_room() {
        let mut db = create_test_database();

        db.save_booking(&NewBooking::new(101, test_range(20, 25)))
            .unwrap();
        db.save_booking(&NewBooking::new(101, test_range(1, 3)))
            .unwrap();
        db.save_booking(&NewBooking::new(102, test_range(1, 3)))
            .unwrap();

        let bookings = db.find_bookings_by_room(101).unwrap();
        assert_eq!(bookings.len(), 2);
        // Ordered by start date
        assert_eq!(bookings[0].dates(), test_range(1, 3));
        assert_eq!(bookings[1].dates(), test_range(20, 25));
    }

    #[test]
    fn test_find_bookings_by_date() {
        let mut db = create_test_database();

        db.save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.save_booking(&NewBooking::new(102, test_range(14, 16)))
            .unwrap();
        db.save_booking(&NewBooking::new(103, test_range(20, 22)))
            .unwrap();

        // Day 14 falls inside the first two stays
        let covering = db.find_bookings_by_date(days(14)).unwrap();
        assert_eq!(covering.len(), 2);

        // The exclusive end is not part of the stay
        let at_checkout = db.find_bookings_by_date(days(15)).unwrap();
        assert_eq!(at_checkout.len(), 1);
        assert_eq!(at_checkout[0].room_id(), 102);
    }

    #[test]
    fn test_delete_booking() {
        let mut db = create_test_database();

        let guest = db
            .find_or_create_guest(&GuestName::new("Alice").unwrap())
            .unwrap();
        let booking = db
            .save_booking(&NewBooking::new(101, test_range(1, 3)).with_guests(vec![guest]))
            .unwrap();

        assert!(db.delete_booking(booking.id()).unwrap());
        assert!(db.find_booking(booking.id()).unwrap().is_none());

        // Links are gone as well
        let links: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM booking_guests", [], |row| row.get(0))
            .unwrap();
        assert_eq!(links, 0);

        // Deleting again is a no-op
        assert!(!db.delete_booking(booking.id()).unwrap());
    }

    #[test]
    fn test_can_reschedule_excludes_self() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();

        assert!(db.can_reschedule(booking.id(), &test_range(12, 17)).unwrap());
    }

    #[test]
    fn test_can_reschedule_sees_other_bookings() {
        let mut db = create_test_database();

        let booking = db
            .save_booking(&NewBooking::new(101, test_range(10, 15)))
            .unwrap();
        db.save_booking(&NewBooking::new(101, test_range(20, 25)))
            .unwrap();

        assert!(!db.can_reschedule(booking.id(), &test_range(22, 27)).unwrap());
        assert!(db.can_reschedule(booking.id(), &test_range(15, 20)).unwrap());
    }
}
