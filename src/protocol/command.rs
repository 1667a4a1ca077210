//! Command definitions
//!
//! Represents requests from clients.

use serde_json::Value;

use crate::entry::EntryId;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::List => "list",
            CommandType::Get => "get",
            CommandType::Create => "create",
            CommandType::Update => "update",
            CommandType::Delete => "delete",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone)]
pub enum Command {
    /// Return the full mapping
    List,

    /// Get one entry
    Get { id: EntryId },

    /// Store a document under a new id
    Create { data: Value },

    /// Replace the document of an existing entry
    Update { id: EntryId, data: Value },

    /// Remove an entry
    Delete { id: EntryId },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::List => CommandType::List,
            Command::Get { .. } => CommandType::Get,
            Command::Create { .. } => CommandType::Create,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
        }
    }
}
