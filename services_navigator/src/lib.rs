//! # State Navigator Service
//!
//! Jumps between state declarations of the dialect and keeps a breadcrumb
//! history of visited states for the active document.
//!
//! ## Philosophy
//!
//! - **Stack-based**: History is a stack; the top is the state last jumped to
//! - **No duplicates on top**: Jumping to the state already on top never grows the stack
//! - **Reset on switch**: History belongs to the active document and is dropped when it changes
//! - **Host-driven**: The navigator moves the view through an [`EditorSurface`], never directly
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Persistent history (nothing survives a document switch or a restart)
//! - Per-document history for several open documents

pub mod indicator;
pub mod navigator;
pub mod stack;

pub use indicator::{IndicatorView, IDLE_TEXT, INDICATOR_TOOLTIP};
pub use navigator::{EditorSurface, NavigationError, NavigationOutcome, NavigationResult, Navigator};
pub use stack::NavigationStack;
