//! Init command implementation.
//!
//! This module implements the `init` command, which creates the bookings
//! database and its schema.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// Initialize the bookings database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        // Opening creates the file and initializes the schema
        let db = open_database(global, &config)?;
        let version = roomer::database::get_schema_version(db.connection())?;

        if !global.quiet {
            eprintln!("Initialized bookings database (schema version {version})");
        }
        Ok(())
    }
}
