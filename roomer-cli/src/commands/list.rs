//! List command implementation.
//!
//! This module implements the `list` command, which lists bookings with
//! optional room and date filters.

use crate::error::CliError;
use crate::utils::{
    format_booking, load_configuration, open_database, parse_date, GlobalOptions,
};
use clap::Args;

/// List bookings.
#[derive(Args)]
pub struct ListCommand {
    /// Only show bookings for this room
    #[arg(long, value_name = "ID")]
    pub room: Option<u64>,

    /// Only show bookings whose stay covers this date
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Print bookings as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.room.is_some() && self.date.is_some() {
            return Err(CliError::InvalidArguments(
                "Cannot specify both --room and --date".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let bookings = if let Some(room_id) = self.room {
            db.find_bookings_by_room(room_id)?
        } else if let Some(ref date) = self.date {
            db.find_bookings_by_date(parse_date(date)?)?
        } else {
            db.list_all_bookings()?
        };

        if self.json {
            let rendered = serde_json::to_string_pretty(&bookings)
                .map_err(|e| CliError::Config(format!("failed to render JSON: {e}")))?;
            println!("{rendered}");
        } else {
            for booking in &bookings {
                println!("{}", format_booking(booking));
            }
            if !global.quiet {
                eprintln!("{} booking(s)", bookings.len());
            }
        }
        Ok(())
    }
}
