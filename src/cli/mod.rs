//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the snapshot and restore layers.

pub mod prompt;
pub mod schedule;
pub mod snapshot;
pub mod value;

pub use prompt::TerminalPrompt;
pub use schedule::{handle_log, handle_tick};
pub use snapshot::{
    handle_list, handle_now, handle_restore, handle_view, ListArgs, NowArgs, RestoreArgs,
    ViewArgs,
};
pub use value::{handle_value_command, ValueCommands};
