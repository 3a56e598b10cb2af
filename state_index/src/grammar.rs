//! The dialect's three line shapes
//!
//! - state declaration: exactly two spaces, a bare word, a colon, nothing else
//! - transitions header: a line starting with four spaces and `transitions:`
//! - transition reference: six or eight spaces, a label, a colon, then a
//!   bare-word target that may be wrapped in single or double quotes
//!
//! `\w` here is the ASCII word class. The label class admits spaces, so any
//! indentation of at least six spaces is accepted in practice.

use regex::Regex;
use std::sync::OnceLock;

/// Prefix that opens a transitions block
pub const TRANSITIONS_HEADER: &str = "    transitions:";

/// Lines scanned after a transitions header
pub const TRANSITION_WINDOW: usize = 9;

fn state_declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^  ([A-Za-z0-9_]+):\s*$").expect("state declaration regex must compile")
    })
}

fn transition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(?: {6}| {8})([A-Za-z0-9_. ]+):\s*["']?([A-Za-z0-9_]+)["']?"#)
            .expect("transition regex must compile")
    })
}

/// Name declared by a state declaration line
pub fn parse_state_declaration(line: &str) -> Option<&str> {
    state_declaration_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_state_declaration(line: &str) -> bool {
    state_declaration_re().is_match(line)
}

pub fn is_transitions_header(line: &str) -> bool {
    line.starts_with(TRANSITIONS_HEADER)
}

/// Edge label and target of a transition line, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRef<'a> {
    pub action: &'a str,
    pub target: &'a str,
}

/// Parses a transition reference
///
/// The pattern is anchored at the start only; anything after the target
/// (a comment, a stray quote) is ignored.
pub fn parse_transition(line: &str) -> Option<TransitionRef<'_>> {
    let caps = transition_re().captures(line)?;
    Some(TransitionRef {
        action: caps.get(1)?.as_str(),
        target: caps.get(2)?.as_str(),
    })
}
