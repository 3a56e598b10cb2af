//! Jump and back-navigation state machine

use crate::{IndicatorView, NavigationStack};
use dialect_types::CommandId;
use state_index::{grammar, StateIndex};
use thiserror::Error;
use tracing::debug;

/// Navigation errors
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No valid YAML state name found on selected line {line_text}")]
    NoStateOnLine { line_text: String },

    #[error("State '{name}' not found.")]
    StateNotFound { name: String },
}

pub type NavigationResult<T> = Result<T, NavigationError>;

/// The editor the navigator reads from and scrolls
///
/// A surface always stands for an open editor; hosts without an active
/// editor do not call the navigator.
pub trait EditorSurface {
    /// Text of the line holding the selection's active end
    fn selected_line_text(&self) -> String;

    /// Moves the cursor to the start of `line` and scrolls it to the top
    fn reveal_line_at_top(&mut self, line: usize);
}

/// Result of a navigation request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The view moved to a state's declaration
    Jumped {
        state: String,
        line: usize,
        /// Whether the state was pushed onto the history
        pushed: bool,
    },
    /// Nothing to do (back requested with too little history)
    Unchanged,
}

/// Breadcrumb navigator for the active document
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: NavigationStack,
    back_command: CommandId,
}

impl Navigator {
    /// Creates a navigator whose indicator binds `back_command`
    pub fn new(back_command: CommandId) -> Self {
        Self {
            stack: NavigationStack::new(),
            back_command,
        }
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Current indicator view of the history
    pub fn indicator(&self) -> IndicatorView {
        IndicatorView::render(&self.stack, &self.back_command)
    }

    /// Jumps to a state's declaration
    ///
    /// Without a target, the target is read from the selected line, which
    /// must be a transition entry. The history only grows if the state is not
    /// already on top.
    pub fn jump(
        &mut self,
        index: &StateIndex,
        surface: &mut dyn EditorSurface,
        target: Option<&str>,
    ) -> NavigationResult<NavigationOutcome> {
        let state = match target {
            Some(state) => state.to_string(),
            None => resolve_from_selection(surface)?,
        };

        let line = index
            .get(&state)
            .ok_or_else(|| NavigationError::StateNotFound { name: state.clone() })?;

        surface.reveal_line_at_top(line);
        let pushed = self.stack.push(&state);
        debug!(state = %state, line, pushed, depth = self.stack.len(), "jumped to state");

        Ok(NavigationOutcome::Jumped { state, line, pushed })
    }

    /// Drops the current state and returns to the one below it
    ///
    /// With fewer than two entries this is a no-op. If the previous state no
    /// longer exists the error is returned and the removed entry stays gone.
    pub fn pop_and_jump(
        &mut self,
        index: &StateIndex,
        surface: &mut dyn EditorSurface,
    ) -> NavigationResult<NavigationOutcome> {
        let Some(left) = self.stack.pop() else {
            return Ok(NavigationOutcome::Unchanged);
        };
        debug!(left = %left, depth = self.stack.len(), "popped state");

        let previous = self.stack.top().map(str::to_string);
        match previous {
            Some(previous) => self.jump(index, surface, Some(&previous)),
            None => Ok(NavigationOutcome::Unchanged),
        }
    }

    /// Forgets all history; called when the active document changes
    pub fn reset(&mut self) {
        if !self.stack.is_empty() {
            debug!(dropped = self.stack.len(), "navigation history reset");
        }
        self.stack.clear();
    }
}

fn resolve_from_selection(surface: &dyn EditorSurface) -> NavigationResult<String> {
    let line_text = surface.selected_line_text();
    match grammar::parse_transition(&line_text) {
        Some(transition) => Ok(transition.target.to_string()),
        None => Err(NavigationError::NoStateOnLine { line_text }),
    }
}
