//! Transition scanning and lens emission

use crate::grammar::{is_state_declaration, is_transitions_header, parse_transition, TRANSITION_WINDOW};
use crate::StateIndex;
use dialect_types::{CommandId, CommandInvocation, TextRange, TextSnapshot};
use serde::{Deserialize, Serialize};

/// A clickable "jump to target state" affordance anchored at a transition line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLens {
    /// Line of the transition entry
    pub line: usize,
    /// Edge label as written, including any extra indentation it captured
    pub action: String,
    /// Target state name
    pub target: String,
}

impl TransitionLens {
    /// Zero-width range at the start of the transition line
    pub fn range(&self) -> TextRange {
        TextRange::at_line_start(self.line)
    }

    pub fn title(&self) -> String {
        format!("➡️ Transition to '{}'", self.target)
    }

    /// Binds the lens to a jump command carrying the target as its argument
    pub fn invocation(&self, jump_command: &CommandId) -> CommandInvocation {
        CommandInvocation::new(jump_command.clone(), self.title()).with_argument(self.target.as_str())
    }
}

/// Finds every transition reference inside a transitions block
///
/// After each header line, at most [`TRANSITION_WINDOW`] lines are examined.
/// The window closes early at the next state declaration. A line that falls
/// inside two windows yields one lens per window.
pub fn scan_transitions(snapshot: &TextSnapshot) -> Vec<TransitionLens> {
    let lines: Vec<&str> = snapshot.lines().collect();
    let mut lenses = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !is_transitions_header(line) {
            continue;
        }

        let window_end = (i + 1 + TRANSITION_WINDOW).min(lines.len());
        for (j, candidate) in lines.iter().enumerate().take(window_end).skip(i + 1) {
            if is_state_declaration(candidate) {
                break;
            }
            if let Some(transition) = parse_transition(candidate) {
                lenses.push(TransitionLens {
                    line: j,
                    action: transition.action.to_string(),
                    target: transition.target.to_string(),
                });
            }
        }
    }

    lenses
}

/// Result of one lens request: a fresh index and the lenses to render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectScan {
    pub index: StateIndex,
    pub lenses: Vec<TransitionLens>,
}

impl DialectScan {
    /// Rebuilds the index and rescans transitions from scratch
    pub fn run(snapshot: &TextSnapshot) -> Self {
        Self {
            index: StateIndex::build(snapshot),
            lenses: scan_transitions(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(text: &str) -> Vec<(usize, String)> {
        scan_transitions(&TextSnapshot::new(text))
            .into_iter()
            .map(|lens| (lens.line, lens.target))
            .collect()
    }

    #[test]
    fn test_scan_stops_at_next_state() {
        let lenses = scan_transitions(&TextSnapshot::new(
            "    transitions:\n      error: \"timeout\"\n  next_state:\n",
        ));
        assert_eq!(lenses.len(), 1);
        assert_eq!(lenses[0].line, 1);
        assert_eq!(lenses[0].target, "timeout");
        assert_eq!(lenses[0].action, "error");
    }

    #[test]
    fn test_lines_after_state_declaration_ignored() {
        let found = targets(
            "    transitions:\n      next: a\n  b:\n      next: c\n",
        );
        assert_eq!(found, [(1, "a".to_string())]);
    }

    #[test]
    fn test_window_is_nine_lines() {
        let mut text = String::from("    transitions:\n");
        for n in 1..=12 {
            text.push_str(&format!("      edge{}: s{}\n", n, n));
        }
        let found = targets(&text);
        assert_eq!(found.len(), TRANSITION_WINDOW);
        assert_eq!(found.first(), Some(&(1, "s1".to_string())));
        assert_eq!(found.last(), Some(&(9, "s9".to_string())));
    }

    #[test]
    fn test_window_clipped_at_end_of_document() {
        let found = targets("    transitions:\n      next: a");
        assert_eq!(found, [(1, "a".to_string())]);
    }

    #[test]
    fn test_window_over_scans_non_transition_lines() {
        // a nested mapping shaped like a transition still inside the window
        let found = targets(
            "    transitions:\n      next: a\n    prompt:\n      text: hello\n",
        );
        assert_eq!(found, [(1, "a".to_string()), (3, "hello".to_string())]);
    }

    #[test]
    fn test_overlapping_windows_repeat_lenses() {
        let found = targets("    transitions:\n    transitions:\n      next: a\n");
        assert_eq!(found, [(2, "a".to_string()), (2, "a".to_string())]);
    }

    #[test]
    fn test_no_header_no_lenses() {
        assert!(targets("  login:\n      next: a\n").is_empty());
        assert!(targets("").is_empty());
    }

    #[test]
    fn test_lens_presentation() {
        let lens = TransitionLens {
            line: 4,
            action: "next".to_string(),
            target: "confirm".to_string(),
        };
        assert_eq!(lens.title(), "➡️ Transition to 'confirm'");
        assert_eq!(lens.range(), TextRange::at_line_start(4));

        let invocation = lens.invocation(&CommandId::new("assist.jump"));
        assert_eq!(invocation.command.as_str(), "assist.jump");
        assert_eq!(invocation.arguments, ["confirm".to_string()]);
        assert_eq!(invocation.title, lens.title());
    }

    #[test]
    fn test_dialect_scan_builds_both() {
        let scan = DialectScan::run(&TextSnapshot::new(
            "states:\n  login:\n    transitions:\n      next: done\n  done:\n",
        ));
        assert_eq!(scan.index.get("done"), Some(4));
        assert_eq!(scan.lenses.len(), 1);
        assert_eq!(scan.index.get(&scan.lenses[0].target), Some(4));
    }
}
