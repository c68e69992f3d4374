//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, date parsing, and
//! output formatting.

use crate::error::CliError;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use roomer::{Booking, BookingEngine, Config, Database, DatabaseConfig};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields carried for parity with the CLI flags
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Use a specific configuration file.
    pub config: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

/// Load configuration, preferring an explicitly named file.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let config = match &global.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options and configuration.
fn resolve_database_path(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    // Priority: global option > configuration > default
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join("roomer.db"));
    }
    config.resolved_database_path().map_err(CliError::from)
}

/// Open database with configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global, config)?;

    let mut db_config = DatabaseConfig::new(db_path);

    // Set busy timeout if specified
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_ms) = config.busy_timeout_ms {
        db_config = db_config.with_busy_timeout(std::time::Duration::from_millis(timeout_ms));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Build a booking engine over the configured database.
pub fn build_engine(
    global: &GlobalOptions,
    config: &Config,
) -> Result<BookingEngine<Database>, CliError> {
    let db = open_database(global, config)?;
    Ok(BookingEngine::new(db).with_reschedule_window_days(config.reschedule_window_days()))
}

/// Parse a date argument.
///
/// Accepts either a plain date (`2025-03-01`, interpreted as midnight
/// UTC) or a full RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!(
            "invalid date '{s}' (expected YYYY-MM-DD or RFC 3339)"
        ))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CliError::InvalidArguments(format!("invalid date '{s}'")))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Format a timestamp for display.
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Render a booking as a single human-readable line.
pub fn format_booking(booking: &Booking) -> String {
    let guests = if booking.guests().is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = booking.guests().iter().map(|g| g.name().as_str()).collect();
        format!(" guests: {}", names.join(", "))
    };
    format!(
        "#{} room {} {} -> {} {}/{}{}",
        booking.id(),
        booking.room_id(),
        format_date(booking.dates().start()),
        format_date(booking.dates().end()),
        booking.status(),
        booking.payment_status(),
        guests
    )
}

/// Print a booking, as JSON when requested.
pub fn print_booking(booking: &Booking, json: bool) -> Result<(), CliError> {
    if json {
        let rendered = serde_json::to_string_pretty(booking)
            .map_err(|e| CliError::Config(format!("failed to render JSON: {e}")))?;
        println!("{rendered}");
    } else {
        println!("{}", format_booking(booking));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_date("2025-03-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date("2025-03-01T15:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_format_booking_line() {
        use roomer::{Booking, DateRange};

        let dates = DateRange::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let booking = Booking::builder(12, 101, dates).build();

        let line = format_booking(&booking);
        assert!(line.starts_with("#12 room 101"));
        assert!(line.contains("2025-03-01 -> 2025-03-03"));
        assert!(line.contains("pending/unpaid"));
    }
}
