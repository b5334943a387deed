//! Live value CLI commands
//!
//! Direct reads and writes of the option store. These never touch snapshot
//! history.

use clap::Subcommand;
use serde_json::Value;

use crate::error::{SnapError, SnapResult};
use crate::storage::KeyValueStore;

/// Value subcommands
#[derive(Subcommand, Debug)]
pub enum ValueCommands {
    /// Print the live value of an option as JSON
    Get {
        /// Option name
        name: String,
    },

    /// Set the live value of an option
    Set {
        /// Option name
        name: String,

        /// New value; parsed as JSON, stored as a plain string if it is not JSON.
        /// An existing option keeps its autoload hint
        value: String,
    },
}

/// Handle a value command
pub fn handle_value_command(store: &dyn KeyValueStore, cmd: ValueCommands) -> SnapResult<()> {
    match cmd {
        ValueCommands::Get { name } => {
            let value = store.get(&name)?.ok_or_else(|| SnapError::NotFound {
                entity_type: "Option",
                identifier: name.clone(),
            })?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        ValueCommands::Set { name, value } => {
            store.update(&name, parse_value(&value))?;
            println!("Set {}.", name);
        }
    }

    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
