//! Rooms command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// List the room catalog.
#[derive(Args)]
pub struct RoomsCommand {
    /// Print rooms as JSON
    #[arg(long)]
    pub json: bool,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let rooms = db.list_all_rooms()?;

        if self.json {
            let rendered = serde_json::to_string_pretty(&rooms)
                .map_err(|e| CliError::Config(format!("failed to render JSON: {e}")))?;
            println!("{rendered}");
        } else {
            for room in &rooms {
                if room.description().is_empty() {
                    println!("{} (id {})", room.number(), room.id());
                } else {
                    println!("{} (id {}): {}", room.number(), room.id(), room.description());
                }
            }
            if !global.quiet {
                eprintln!("{} room(s)", rooms.len());
            }
        }
        Ok(())
    }
}
