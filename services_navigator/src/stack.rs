//! Breadcrumb stack of visited states

use serde::{Deserialize, Serialize};

/// Ordered history of visited state names, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    entries: Vec<String>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently visited state
    pub fn top(&self) -> Option<&str> {
        self.entries.last().map(|s| s.as_str())
    }

    /// Pushes a state unless it is already on top
    ///
    /// Returns true if the stack grew.
    pub fn push(&mut self, state: &str) -> bool {
        if self.top() == Some(state) {
            return false;
        }
        self.entries.push(state.to_string());
        true
    }

    /// Removes the top entry if another entry remains below it
    ///
    /// Returns the removed state. With fewer than two entries nothing happens.
    pub fn pop(&mut self) -> Option<String> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_top() {
        let mut stack = NavigationStack::new();
        assert!(stack.top().is_none());
        assert!(stack.push("login"));
        assert!(stack.push("confirm"));
        assert_eq!(stack.top(), Some("confirm"));
        assert_eq!(stack.entries(), ["login".to_string(), "confirm".to_string()]);
    }

    #[test]
    fn test_push_same_top_is_noop() {
        let mut stack = NavigationStack::new();
        stack.push("login");
        assert!(!stack.push("login"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_push_revisit_below_top_is_allowed() {
        let mut stack = NavigationStack::new();
        stack.push("a");
        stack.push("b");
        assert!(stack.push("a"));
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_pop_requires_two_entries() {
        let mut stack = NavigationStack::new();
        assert_eq!(stack.pop(), None);

        stack.push("login");
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 1);

        stack.push("confirm");
        assert_eq!(stack.pop(), Some("confirm".to_string()));
        assert_eq!(stack.top(), Some("login"));
    }

    #[test]
    fn test_clear() {
        let mut stack = NavigationStack::new();
        stack.push("login");
        stack.push("confirm");
        stack.clear();
        assert!(stack.is_empty());
    }
}
