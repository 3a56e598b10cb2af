//! Decoration styles the host applies to highlighted ranges

use crate::MarkerClass;
use serde::{Deserialize, Serialize};

/// How one marker class is painted
///
/// The ruler mark always goes in the right lane of the overview ruler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationStyle {
    /// CSS colour of the range background
    pub background: String,
    /// CSS border shorthand
    pub border: String,
    /// Colour of the mark in the overview ruler
    pub ruler_color: String,
}

impl DecorationStyle {
    /// Built-in style for a marker class
    pub fn default_for(class: MarkerClass) -> Self {
        match class {
            MarkerClass::Todo => Self::new("rgba(255,255,0,0.2)", "1px solid gold", "yellow"),
            MarkerClass::Fixme => Self::new("rgba(255,0,0,0.2)", "1px solid red", "red"),
        }
    }

    pub fn new(
        background: impl Into<String>,
        border: impl Into<String>,
        ruler_color: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            border: border.into(),
            ruler_color: ruler_color.into(),
        }
    }
}
