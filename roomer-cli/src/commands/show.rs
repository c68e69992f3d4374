//! Show command implementation.

use crate::error::CliError;
use crate::utils::{build_engine, load_configuration, print_booking, GlobalOptions};
use clap::Args;

/// Show a single booking.
#[derive(Args)]
pub struct ShowCommand {
    /// Booking identifier
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Print the booking as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let engine = build_engine(global, &config)?;

        let booking = engine.get_booking(self.id)?;
        print_booking(&booking, self.json)
    }
}
