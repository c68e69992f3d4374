//! Reschedule command implementation.
//!
//! This module implements the `reschedule` command, which moves a booking
//! to new dates. Bookings starting within the protection window can no
//! longer be moved.

use crate::error::CliError;
use crate::utils::{build_engine, load_configuration, parse_date, print_booking, GlobalOptions};
use clap::Args;

/// Move a booking to new dates.
#[derive(Args)]
pub struct RescheduleCommand {
    /// Booking identifier
    #[arg(value_name = "ID")]
    pub id: u64,

    /// New check-in date (inclusive)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// New check-out date (exclusive)
    #[arg(long, value_name = "DATE")]
    pub to: String,

    /// Print the booking as JSON
    #[arg(long)]
    pub json: bool,
}

impl RescheduleCommand {
    /// Execute the reschedule command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_date(&self.from)?;
        let end = parse_date(&self.to)?;

        let config = load_configuration(global)?;
        let mut engine = build_engine(global, &config)?;

        let booking = engine.reschedule_booking(self.id, start, end)?;

        print_booking(&booking, self.json)?;
        if !global.quiet && !self.json {
            eprintln!("Rescheduled booking {}", booking.id());
        }
        Ok(())
    }
}
