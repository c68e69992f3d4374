//! Database operations for the guest directory.
//!
//! Guests are deduplicated by name: the directory either finds the
//! existing record or inserts a new one inside a write transaction.

#![allow(clippy::cast_sign_loss)]

use chrono::Utc;
use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::guest::{Guest, GuestName};

use super::bookings::{datetime_to_unix_secs, unix_secs_to_datetime};
use super::connection::Database;

const SELECT_GUEST_BY_NAME: &str = r"
    SELECT id, name, created_at, updated_at
    FROM guests
    WHERE name = ?
";

const INSERT_GUEST: &str = r"
    INSERT INTO guests (name, created_at, updated_at)
    VALUES (?, ?, ?)
";

const SELECT_GUESTS_FOR_BOOKING: &str = r"
    SELECT g.id, g.name, g.created_at, g.updated_at
    FROM guests g
    JOIN booking_guests bg ON bg.guest_id = g.id
    WHERE bg.booking_id = ?
    ORDER BY bg.position
";

/// Helper function to deserialize a guest from a database row.
///
/// Expects row fields in this order: id, name, `created_at`, `updated_at`.
fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    let id: u64 = row.get(0)?;
    let name: String = row.get(1)?;
    let created_secs: i64 = row.get(2)?;
    let updated_secs: i64 = row.get(3)?;

    let name =
        GuestName::new(&name).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Guest::new(
        id,
        name,
        unix_secs_to_datetime(created_secs)?,
        unix_secs_to_datetime(updated_secs)?,
    ))
}

/// Loads the guests linked to a booking, ordered by their position in the
/// original submission.
pub(super) fn guests_for_booking(conn: &Connection, booking_id: u64) -> Result<Vec<Guest>> {
    let mut stmt = conn.prepare(SELECT_GUESTS_FOR_BOOKING)?;
    let rows = stmt.query_map(params![booking_id], row_to_guest)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

impl Database {
    /// Finds a guest by name, inserting a new record if none exists.
    ///
    /// The lookup and insert run in a single IMMEDIATE transaction so
    /// that concurrent submissions of the same name converge on one
    /// directory entry rather than racing to create duplicates. The
    /// UNIQUE constraint on the name column backs this up.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or
    /// committed, or if the query or insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roomer::database::{Database, DatabaseConfig};
    /// use roomer::GuestName;
    ///
    /// let config = DatabaseConfig::new("/tmp/roomer.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let name = GuestName::new("Alice").unwrap();
    /// let first = db.find_or_create_guest(&name).unwrap();
    /// let second = db.find_or_create_guest(&name).unwrap();
    /// assert_eq!(first.id(), second.id());
    /// ```
    pub fn find_or_create_guest(&mut self, name: &GuestName) -> Result<Guest> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_GUEST_BY_NAME, params![name.as_str()], row_to_guest)
        {
            Ok(guest) => Some(guest),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        let guest = if let Some(guest) = existing {
            guest
        } else {
            let now = unix_secs_to_datetime(Utc::now().timestamp())?;
            let now_secs = datetime_to_unix_secs(now);
            tx.execute(INSERT_GUEST, params![name.as_str(), now_secs, now_secs])?;
            let id = tx.last_insert_rowid() as u64;
            Guest::new(id, name.clone(), now, now)
        };

        tx.commit()?;
        Ok(guest)
    }

    /// Looks up a guest by name without creating one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(guest))` if the guest exists
    /// - `Ok(None)` if the guest doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn find_guest_by_name(&self, name: &GuestName) -> Result<Option<Guest>> {
        match self
            .conn
            .query_row(SELECT_GUEST_BY_NAME, params![name.as_str()], row_to_guest)
        {
            Ok(guest) => Ok(Some(guest)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;

    #[test]
    fn test_find_or_create_inserts_once() {
        let mut db = create_test_database();
        let name = GuestName::new("Alice").unwrap();

        let first = db.find_or_create_guest(&name).unwrap();
        let second = db.find_or_create_guest(&name).unwrap();

        assert_eq!(first, second);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_distinct_names_get_distinct_records() {
        let mut db = create_test_database();

        let alice = db
            .find_or_create_guest(&GuestName::new("Alice").unwrap())
            .unwrap();
        let bob = db
            .find_or_create_guest(&GuestName::new("Bob").unwrap())
            .unwrap();

        assert_ne!(alice.id(), bob.id());
    }

    #[test]
    fn test_find_guest_by_name() {
        let mut db = create_test_database();
        let name = GuestName::new("Carol").unwrap();

        assert!(db.find_guest_by_name(&name).unwrap().is_none());

        let created = db.find_or_create_guest(&name).unwrap();
        let found = db.find_guest_by_name(&name).unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_guests_for_booking_empty() {
        let db = create_test_database();
        let guests = guests_for_booking(db.connection(), 999).unwrap();
        assert!(guests.is_empty());
    }
}
