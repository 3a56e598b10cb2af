//! Command identifiers and invocations

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Unique identifier for a host command
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(String);

impl CommandId {
    /// Creates a new command ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A command bound to a clickable element, with the arguments it runs with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    /// Command to execute
    pub command: CommandId,
    /// Label shown to the user
    pub title: String,
    /// Positional string arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl CommandInvocation {
    /// Creates an invocation without arguments
    pub fn new(command: CommandId, title: impl Into<String>) -> Self {
        Self {
            command,
            title: title.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an argument
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}
