//! Database operations for the room catalog.

#![allow(clippy::cast_sign_loss)]

use chrono::Utc;
use rusqlite::{params, TransactionBehavior};

use crate::error::{Error, Result};
use crate::room::{NewRoom, Room};

use super::bookings::{datetime_to_unix_secs, unix_secs_to_datetime};
use super::connection::Database;

const SELECT_ROOM: &str = r"
    SELECT id, number, description, created_at, updated_at
    FROM rooms
    WHERE id = ?
";

const SELECT_ROOM_BY_NUMBER: &str = "SELECT id FROM rooms WHERE number = ?";

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (number, description, created_at, updated_at)
    VALUES (?, ?, ?, ?)
";

const LIST_ROOMS: &str = r"
    SELECT id, number, description, created_at, updated_at
    FROM rooms
    ORDER BY number
";

/// Helper function to deserialize a room from a database row.
///
/// Expects row fields in this order: id, number, description,
/// `created_at`, `updated_at`.
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: u64 = row.get(0)?;
    let number: String = row.get(1)?;
    let description: String = row.get(2)?;
    let created_secs: i64 = row.get(3)?;
    let updated_secs: i64 = row.get(4)?;

    Ok(Room::new(
        id,
        number,
        description,
        unix_secs_to_datetime(created_secs)?,
        unix_secs_to_datetime(updated_secs)?,
    ))
}

impl Database {
    /// Adds a room to the catalog.
    ///
    /// Room numbers are unique; the check and insert run in one write
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a room with the same number already exists, or
    /// if the transaction cannot be started or committed.
    pub fn add_room(&mut self, new: &NewRoom) -> Result<Room> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists = match tx.query_row(SELECT_ROOM_BY_NUMBER, params![new.number], |row| {
            row.get::<_, i64>(0)
        }) {
            Ok(_) => true,
            Err(rusqlite::Error::QueryReturnedNoRows) => false,
            Err(e) => return Err(e.into()),
        };
        if exists {
            return Err(Error::Validation {
                field: "room number".into(),
                message: format!("room '{}' already exists", new.number),
            });
        }

        let now = unix_secs_to_datetime(Utc::now().timestamp())?;
        let now_secs = datetime_to_unix_secs(now);
        tx.execute(
            INSERT_ROOM,
            params![new.number, new.description, now_secs, now_secs],
        )?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit()?;
        Ok(Room::new(
            id,
            new.number.clone(),
            new.description.clone(),
            now,
            now,
        ))
    }

    /// Retrieves a room from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(room))` if the room exists
    /// - `Ok(None)` if the room doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn find_room(&self, id: u64) -> Result<Option<Room>> {
        match self.conn.query_row(SELECT_ROOM, params![id], row_to_room) {
            Ok(room) => Ok(Some(room)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all rooms ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_rooms(&self) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(LIST_ROOMS)?;
        let rows = stmt.query_map([], row_to_room)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;

    #[test]
    fn test_add_and_find_room() {
        let mut db = create_test_database();

        let room = db
            .add_room(&NewRoom::new("101", "Sea view double").unwrap())
            .unwrap();

        let found = db.find_room(room.id()).unwrap().unwrap();
        assert_eq!(found, room);
        assert_eq!(found.number(), "101");
        assert_eq!(found.description(), "Sea view double");
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let mut db = create_test_database();

        db.add_room(&NewRoom::new("101", "").unwrap()).unwrap();
        let err = db.add_room(&NewRoom::new("101", "").unwrap()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_find_room_missing() {
        let db = create_test_database();
        assert!(db.find_room(42).unwrap().is_none());
    }

    #[test]
    fn test_list_rooms_ordered_by_number() {
        let mut db = create_test_database();

        db.add_room(&NewRoom::new("202", "").unwrap()).unwrap();
        db.add_room(&NewRoom::new("101", "").unwrap()).unwrap();

        let rooms = db.list_all_rooms().unwrap();
        let numbers: Vec<_> = rooms.iter().map(Room::number).collect();
        assert_eq!(numbers, vec!["101", "202"]);
    }
}
