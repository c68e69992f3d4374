//! Main entry point for the roomer CLI.
//!
//! This is the command-line interface for the roomer booking system.
//! It provides commands for managing room bookings:
//! - `init`: Initialize the bookings database
//! - `book`: Create a booking
//! - `cancel`: Cancel a booking
//! - `reschedule`: Move a booking to new dates
//! - `show` / `list`: Inspect bookings
//! - `add-room` / `rooms`: Manage the room catalog

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = roomer::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        config: cli.config,
        busy_timeout: cli.busy_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Reschedule(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::Rooms(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
