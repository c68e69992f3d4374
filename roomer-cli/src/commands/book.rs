//! Book command implementation.
//!
//! This module implements the `book` command, which creates a booking
//! for a room over a half-open date range.

use crate::error::CliError;
use crate::utils::{build_engine, load_configuration, parse_date, print_booking, GlobalOptions};
use clap::Args;
use roomer::{BookingRequest, GuestName};

/// Create a booking.
#[derive(Args)]
pub struct BookCommand {
    /// Room identifier
    #[arg(long, value_name = "ID")]
    pub room: u64,

    /// Check-in date (inclusive)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// Check-out date (exclusive)
    #[arg(long, value_name = "DATE")]
    pub to: String,

    /// Free-text comment
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub comment: String,

    /// Guest name (repeatable, order is preserved)
    #[arg(long = "guest", value_name = "NAME")]
    pub guests: Vec<String>,

    /// Print the booking as JSON
    #[arg(long)]
    pub json: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Parse dates and guest names up front
        let start = parse_date(&self.from)?;
        let end = parse_date(&self.to)?;

        let mut guest_names = Vec::with_capacity(self.guests.len());
        for name in &self.guests {
            let name =
                GuestName::new(name).map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            guest_names.push(name);
        }

        // 2. Load configuration and build the engine
        let config = load_configuration(global)?;
        let mut engine = build_engine(global, &config)?;

        // 3. Create the booking
        let request = BookingRequest::new(self.room, start, end)
            .with_comment(self.comment)
            .with_guests(guest_names);
        let booking = engine.create_booking(&request)?;

        print_booking(&booking, self.json)?;
        if !global.quiet && !self.json {
            eprintln!("Booked room {} (booking {})", booking.room_id(), booking.id());
        }
        Ok(())
    }
}
