//! Command implementations for the roomer CLI.

mod add_room;
mod book;
mod cancel;
mod init;
mod list;
mod reschedule;
mod rooms;
mod show;

pub use add_room::AddRoomCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reschedule::RescheduleCommand;
pub use rooms::RoomsCommand;
pub use show::ShowCommand;
