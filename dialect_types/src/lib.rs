#![no_std]

//! # Dialect Types
//!
//! Host-neutral types shared by the highlighter, the state index and the
//! navigator.
//!
//! ## Philosophy
//!
//! - **Snapshots, not buffers**: Scanners read immutable text snapshots and never mutate them
//! - **Host-neutral**: No editor API leaks into these types; hosts translate at the edge
//! - **Serializable**: Everything can be captured in a render snapshot for tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A text buffer with editing operations
//! - A YAML document model

extern crate alloc;

pub mod command;
pub mod document;
pub mod position;
pub mod snapshot;

pub use command::{CommandId, CommandInvocation};
pub use document::{DocumentId, LanguageId};
pub use position::{TextPosition, TextRange};
pub use snapshot::TextSnapshot;
