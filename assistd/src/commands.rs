//! Commands the add-on contributes to the host

use dialect_types::CommandId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Jump to a state; optional argument: the target state name
pub const JUMP_COMMAND: &str = "oda-dialog-code-visual-helper.transitionToState";

/// Return to the previous state of the history; no arguments
pub const POP_COMMAND: &str = "oda-dialog-code-visual-helper.popState";

/// Command errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(CommandId),

    #[error("Command {command} takes at most {max} argument(s), got {given}")]
    TooManyArguments {
        command: CommandId,
        max: usize,
        given: usize,
    },
}

/// Command descriptor with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub id: CommandId,
    /// Human-readable command name
    pub title: String,
    pub description: String,
    /// Largest number of positional arguments accepted
    pub max_arguments: usize,
}

impl CommandDescriptor {
    fn new(id: &str, title: &str, description: &str, max_arguments: usize) -> Self {
        Self {
            id: CommandId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            max_arguments,
        }
    }
}

/// Descriptors for every contributed command, in registration order
pub fn contributed_commands() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(
            JUMP_COMMAND,
            "Transition to State",
            "Jumps to a state declaration, taken from the argument or the selected line",
            1,
        ),
        CommandDescriptor::new(
            POP_COMMAND,
            "Back to Previous State",
            "Drops the current state from the history and returns to the one before it",
            0,
        ),
    ]
}

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistCommand {
    /// Jump to the named state, or to the target on the selected line
    Jump { target: Option<String> },
    Pop,
}

impl AssistCommand {
    /// Parses a command id and its positional arguments
    pub fn parse(id: &CommandId, arguments: &[String]) -> Result<Self, CommandError> {
        let descriptor = contributed_commands()
            .into_iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| CommandError::UnknownCommand(id.clone()))?;

        if arguments.len() > descriptor.max_arguments {
            return Err(CommandError::TooManyArguments {
                command: id.clone(),
                max: descriptor.max_arguments,
                given: arguments.len(),
            });
        }

        match id.as_str() {
            // An empty target means "use the selected line"
            JUMP_COMMAND => Ok(AssistCommand::Jump {
                target: arguments.first().filter(|t| !t.is_empty()).cloned(),
            }),
            POP_COMMAND => Ok(AssistCommand::Pop),
            _ => Err(CommandError::UnknownCommand(id.clone())),
        }
    }
}

pub fn jump_command_id() -> CommandId {
    CommandId::new(JUMP_COMMAND)
}

pub fn pop_command_id() -> CommandId {
    CommandId::new(POP_COMMAND)
}
