//! # Marker Highlighter
//!
//! Finds `TODO` and `FIXME` marker comments in a document and describes how
//! the host should decorate them.
//!
//! ## Philosophy
//!
//! - **Full recompute**: Every scan produces a fresh [`HighlightSet`]; hosts replace, never merge
//! - **Fixed grammar**: The keyword patterns are not configurable, only their styling is
//! - **Infallible**: Any text, including the empty text, yields a (possibly empty) result
//!
//! ## Example
//!
//! ```
//! use dialect_types::TextSnapshot;
//! use marker_highlight::{scan_markers, MarkerClass};
//!
//! let snapshot = TextSnapshot::new("let x = 1; // TODO: rename\n");
//! let set = scan_markers(&snapshot);
//! assert_eq!(set.matches(MarkerClass::Todo).len(), 1);
//! assert_eq!(set.matches(MarkerClass::Todo)[0].annotation, "📝 TODO: rename");
//! ```

pub mod scan;
pub mod style;

pub use scan::{scan_markers, HighlightMatch, HighlightSet, MarkerClass};
pub use style::DecorationStyle;
