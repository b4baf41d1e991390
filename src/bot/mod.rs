pub mod commands;

pub use commands::{build_command_bot, run_command_handler, Command};
