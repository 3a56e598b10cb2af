//! Status indicator rendering for the breadcrumb stack

use crate::NavigationStack;
use dialect_types::CommandId;
use serde::{Deserialize, Serialize};

/// Text shown while the history is empty
pub const IDLE_TEXT: &str = "$(debug-start) Ready";

pub const INDICATOR_TOOLTIP: &str = "State transition history";

const ACTIVE_ICON: &str = "$(circuit-board)";
const SEPARATOR: &str = " → ";

/// What the host's status item should show for a given stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorView {
    pub text: String,
    pub tooltip: String,
    /// Action run when the indicator is activated; none while idle
    pub command: Option<CommandId>,
}

impl IndicatorView {
    /// The idle indicator
    pub fn idle() -> Self {
        Self {
            text: IDLE_TEXT.to_string(),
            tooltip: INDICATOR_TOOLTIP.to_string(),
            command: None,
        }
    }

    /// Renders a stack, binding the back action when it is non-empty
    pub fn render(stack: &NavigationStack, back_command: &CommandId) -> Self {
        if stack.is_empty() {
            return Self::idle();
        }

        Self {
            text: format!("{} {}", ACTIVE_ICON, stack.entries().join(SEPARATOR)),
            tooltip: INDICATOR_TOOLTIP.to_string(),
            command: Some(back_command.clone()),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.command.is_none()
    }
}
