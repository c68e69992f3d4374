//! Cancel command implementation.
//!
//! This module implements the `cancel` command. Cancelling an already
//! cancelled booking succeeds without changing anything.

use crate::error::CliError;
use crate::utils::{build_engine, load_configuration, print_booking, GlobalOptions};
use clap::Args;

/// Cancel a booking.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking identifier
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Print the booking as JSON
    #[arg(long)]
    pub json: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut engine = build_engine(global, &config)?;

        let booking = engine.cancel_booking(self.id)?;

        print_booking(&booking, self.json)?;
        if !global.quiet && !self.json {
            eprintln!("Cancelled booking {}", booking.id());
        }
        Ok(())
    }
}
