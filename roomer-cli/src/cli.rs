//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, BookCommand, CancelCommand, InitCommand, ListCommand, RescheduleCommand,
    RoomsCommand, ShowCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing hotel room bookings.
#[derive(Parser)]
#[command(name = "roomer")]
#[command(version, about = "Manage hotel room bookings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use a specific configuration file
    #[arg(long, value_name = "PATH", global = true, env = "ROOMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ROOMER_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the bookings database
    Init(InitCommand),

    /// Create a booking
    Book(BookCommand),

    /// Cancel a booking
    Cancel(CancelCommand),

    /// Move a booking to new dates
    Reschedule(RescheduleCommand),

    /// Show a single booking
    Show(ShowCommand),

    /// List bookings
    List(ListCommand),

    /// Add a room to the catalog
    AddRoom(AddRoomCommand),

    /// List the room catalog
    Rooms(RoomsCommand),
}
