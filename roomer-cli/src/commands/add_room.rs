//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roomer::NewRoom;

/// Add a room to the catalog.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Human-facing room number, such as "101" or "2B"
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Free-text description
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let new = NewRoom::new(&self.number, self.description)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room = db.add_room(&new)?;

        if !global.quiet {
            eprintln!("Added room {} (id {})", room.number(), room.id());
        }
        Ok(())
    }
}
