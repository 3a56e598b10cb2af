//! # Event Script Parser
//!
//! A line-based format of editor events for driving the simulation host
//! deterministically.
//!
//! ## Format
//!
//! One action per line; blank lines and lines starting with `#` are skipped:
//! - `open <path> [language]`: open a file and make it active
//! - `activate <path>`: make an already-open document active
//! - `close`: leave no active editor
//! - `select <line>`: move the selection to a zero-based line
//! - `insert <line> "<text>"`, `replace <line> "<text>"`, `delete <line>`: edit the active document
//! - `jump [state]`, `back`: run the navigation commands
//! - `lens <n>`: click the n-th lens of the active document
//! - `status`: click the status indicator
//!
//! Quoted text keeps its spaces; `\"`, `\\` and `\t` are the only escapes.
//!
//! ## Example
//!
//! ```text
//! open flows/login.yaml
//! select 4
//! jump            # follow the transition on line 4
//! back
//! ```

use thiserror::Error;

/// Event script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventScriptError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// A single scripted editor event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedEvent {
    Open {
        path: String,
        language: Option<String>,
    },
    Activate {
        path: String,
    },
    Close,
    Select {
        line: usize,
    },
    Insert {
        line: usize,
        text: String,
    },
    Replace {
        line: usize,
        text: String,
    },
    Delete {
        line: usize,
    },
    Jump {
        target: Option<String>,
    },
    Back,
    Lens {
        index: usize,
    },
    Status,
}

/// Parsed event script
#[derive(Debug, Clone)]
pub struct EventScript {
    events: Vec<ScriptedEvent>,
}

impl EventScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, EventScriptError> {
        let mut events = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            events.push(Self::parse_line(line, line_num + 1)?);
        }

        if events.is_empty() {
            return Err(EventScriptError::EmptyScript);
        }

        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in script order
    pub fn events(&self) -> impl Iterator<Item = &ScriptedEvent> {
        self.events.iter()
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptedEvent, EventScriptError> {
        let parse_error = |message: String| EventScriptError::ParseError {
            line: line_num,
            message,
        };

        let (action, rest) = match line.split_once(char::is_whitespace) {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };

        // Quoted text may hold a '#', so only unquoted actions lose trailing comments
        let rest = match action {
            "insert" | "replace" => rest,
            _ => strip_comment(rest),
        };
        let words: Vec<&str> = rest.split_whitespace().collect();

        match action {
            "open" => match words.as_slice() {
                [path] => Ok(ScriptedEvent::Open {
                    path: path.to_string(),
                    language: None,
                }),
                [path, language] => Ok(ScriptedEvent::Open {
                    path: path.to_string(),
                    language: Some(language.to_string()),
                }),
                _ => Err(parse_error("expected: open <path> [language]".to_string())),
            },
            "activate" => match words.as_slice() {
                [path] => Ok(ScriptedEvent::Activate {
                    path: path.to_string(),
                }),
                _ => Err(parse_error("expected: activate <path>".to_string())),
            },
            "close" => no_arguments(&words, ScriptedEvent::Close).map_err(parse_error),
            "back" => no_arguments(&words, ScriptedEvent::Back).map_err(parse_error),
            "status" => no_arguments(&words, ScriptedEvent::Status).map_err(parse_error),
            "select" => match words.as_slice() {
                [line] => Ok(ScriptedEvent::Select {
                    line: parse_number(line).map_err(parse_error)?,
                }),
                _ => Err(parse_error("expected: select <line>".to_string())),
            },
            "delete" => match words.as_slice() {
                [line] => Ok(ScriptedEvent::Delete {
                    line: parse_number(line).map_err(parse_error)?,
                }),
                _ => Err(parse_error("expected: delete <line>".to_string())),
            },
            "lens" => match words.as_slice() {
                [index] => Ok(ScriptedEvent::Lens {
                    index: parse_number(index).map_err(parse_error)?,
                }),
                _ => Err(parse_error("expected: lens <n>".to_string())),
            },
            "jump" => match words.as_slice() {
                [] => Ok(ScriptedEvent::Jump { target: None }),
                [target] => Ok(ScriptedEvent::Jump {
                    target: Some(target.to_string()),
                }),
                _ => Err(parse_error("expected: jump [state]".to_string())),
            },
            "insert" | "replace" => {
                let (line, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| parse_error(format!("expected: {} <line> \"<text>\"", action)))?;
                let line = parse_number(line).map_err(parse_error)?;
                let text = parse_quoted(text.trim()).map_err(parse_error)?;
                if action == "insert" {
                    Ok(ScriptedEvent::Insert { line, text })
                } else {
                    Ok(ScriptedEvent::Replace { line, text })
                }
            }
            other => Err(EventScriptError::UnknownAction(other.to_string())),
        }
    }
}

fn strip_comment(rest: &str) -> &str {
    match rest.find('#') {
        Some(pos) => rest[..pos].trim_end(),
        None => rest,
    }
}

fn no_arguments(words: &[&str], event: ScriptedEvent) -> Result<ScriptedEvent, String> {
    if words.is_empty() {
        Ok(event)
    } else {
        Err(format!("unexpected arguments: {}", words.join(" ")))
    }
}

fn parse_number(word: &str) -> Result<usize, String> {
    word.parse::<usize>()
        .map_err(|_| format!("expected a non-negative number, got '{}'", word))
}

fn parse_quoted(text: &str) -> Result<String, String> {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| format!("expected quoted text, got {}", text))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(format!("unknown escape \\{}", other)),
            None => return Err("dangling escape at end of text".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(text: &str) -> ScriptedEvent {
        EventScript::from_text(text).unwrap().events().next().cloned().unwrap()
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(
            EventScript::from_text("").unwrap_err(),
            EventScriptError::EmptyScript
        );
        assert_eq!(
            EventScript::from_text("# only a comment\n\n").unwrap_err(),
            EventScriptError::EmptyScript
        );
    }

    #[test]
    fn test_open_with_and_without_language() {
        assert_eq!(
            parse_one("open flows/a.yaml"),
            ScriptedEvent::Open {
                path: "flows/a.yaml".to_string(),
                language: None
            }
        );
        assert_eq!(
            parse_one("open notes.txt yaml"),
            ScriptedEvent::Open {
                path: "notes.txt".to_string(),
                language: Some("yaml".to_string())
            }
        );
    }

    #[test]
    fn test_jump_optional_target() {
        assert_eq!(parse_one("jump"), ScriptedEvent::Jump { target: None });
        assert_eq!(
            parse_one("jump confirm  # explicit"),
            ScriptedEvent::Jump {
                target: Some("confirm".to_string())
            }
        );
    }

    #[test]
    fn test_quoted_text_keeps_indentation() {
        assert_eq!(
            parse_one(r#"insert 3 "      next: \"done\"""#),
            ScriptedEvent::Insert {
                line: 3,
                text: "      next: \"done\"".to_string()
            }
        );
        assert_eq!(
            parse_one(r##"replace 0 "# TODO not a comment""##),
            ScriptedEvent::Replace {
                line: 0,
                text: "# TODO not a comment".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = EventScript::from_text("open a.yaml\n\nselect two").unwrap_err();
        assert!(matches!(err, EventScriptError::ParseError { line: 3, .. }));

        let err = EventScript::from_text("insert 1 unquoted").unwrap_err();
        assert!(matches!(err, EventScriptError::ParseError { line: 1, .. }));

        let err = EventScript::from_text("back now").unwrap_err();
        assert!(matches!(err, EventScriptError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            EventScript::from_text("scroll 4").unwrap_err(),
            EventScriptError::UnknownAction("scroll".to_string())
        );
    }

    #[test]
    fn test_events_in_order() {
        let script = EventScript::from_text(
            "open a.yaml\nselect 2\njump\nback\nlens 0\nstatus\ndelete 1\nactivate a.yaml\nclose\n",
        )
        .unwrap();
        assert_eq!(script.len(), 9);
        let kinds: Vec<_> = script.events().cloned().collect();
        assert_eq!(kinds[1], ScriptedEvent::Select { line: 2 });
        assert_eq!(kinds[4], ScriptedEvent::Lens { index: 0 });
        assert_eq!(kinds[8], ScriptedEvent::Close);
    }
}
