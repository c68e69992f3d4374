//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the roomer booking system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// The human-facing room number is unique across the catalog.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the guests table.
///
/// Guest names are unique so that repeated submissions of the same name
/// link to one directory entry instead of accumulating duplicates.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the bookings table.
///
/// Dates are stored as Unix epoch seconds; the interval is half-open
/// `[start_date, end_date)` and the CHECK constraint rejects inverted or
/// empty ranges at the storage layer as a last line of defense.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL,
        start_date INTEGER NOT NULL,
        end_date INTEGER NOT NULL,
        comment TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (start_date < end_date)
    )";

/// SQL statement to create the booking-to-guest link table.
///
/// The position column preserves guest submission order within a booking.
pub const CREATE_BOOKING_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS booking_guests (
        booking_id INTEGER NOT NULL REFERENCES bookings(id),
        guest_id INTEGER NOT NULL REFERENCES guests(id),
        position INTEGER NOT NULL,
        PRIMARY KEY (booking_id, guest_id)
    )";

/// SQL statement to create an index on room and date columns.
///
/// This index speeds up the availability predicate, which filters by room
/// and compares date bounds on every create and reschedule.
pub const CREATE_ROOM_DATES_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_bookings_room_dates
    ON bookings(room_id, start_date, end_date)";

/// SQL statement to create an index on the booking status column.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)";

/// SQL statement to create an index on the link table's guest column.
pub const CREATE_GUEST_LINK_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_booking_guests_guest ON booking_guests(guest_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL predicate counting active bookings that overlap a half-open range
/// on a room.
///
/// Parameters: room id, range start, range end. Two half-open ranges
/// `[a, b)` and `[c, d)` overlap iff `a < d AND c < b`; only `pending` and
/// `confirmed` bookings block availability.
pub const COUNT_OVERLAPPING_BOOKINGS: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE room_id = ?1
      AND status IN ('pending', 'confirmed')
      AND start_date < ?3
      AND end_date > ?2
";

/// SQL predicate counting active bookings that would block rescheduling a
/// booking to a new half-open range on its own room.
///
/// Parameters: booking id, range start, range end. The booking being moved
/// is excluded so it never conflicts with itself.
pub const COUNT_RESCHEDULE_CONFLICTS: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE id <> ?1
      AND room_id = (SELECT room_id FROM bookings WHERE id = ?1)
      AND status IN ('pending', 'confirmed')
      AND start_date < ?3
      AND end_date > ?2
";

/// SQL statement to insert a booking row.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (room_id, start_date, end_date, comment, status, payment_status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to link a guest to a booking at a given position.
pub const INSERT_BOOKING_GUEST: &str = r"
    INSERT INTO booking_guests (booking_id, guest_id, position)
    VALUES (?, ?, ?)
";
