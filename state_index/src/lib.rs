//! # State Index
//!
//! Line-oriented scanning of the conversational state-machine dialect: a YAML
//! convention where a `states` mapping holds one block per state, each with a
//! nested `transitions` mapping of edge label to target state.
//!
//! ```yaml
//! states:
//!   login:
//!     transitions:
//!       next: "confirm"
//!       error: 'timeout'
//!   confirm:
//! ```
//!
//! ## Philosophy
//!
//! - **Micro-grammar, not YAML**: Three fixed line shapes are recognised; nothing else is parsed
//! - **Rebuilt every time**: Each scan starts from nothing; there is no incremental state
//! - **Silent on malformed input**: Lines that do not fit a shape are skipped
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A YAML parser (no anchors, flow mappings, multi-document files)
//! - A validator (dangling targets, cycles and unreachable states go unnoticed)

pub mod grammar;
pub mod index;
pub mod lens;

pub use grammar::{TransitionRef, TRANSITIONS_HEADER, TRANSITION_WINDOW};
pub use index::StateIndex;
pub use lens::{scan_transitions, DialectScan, TransitionLens};
