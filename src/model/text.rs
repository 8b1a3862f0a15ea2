//! Text-drawing scope types.

use serde::{Deserialize, Serialize};

/// Font selected by a `Tf` operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDirective {
    /// Font resource name without the leading `/` (e.g. "F1")
    pub name: String,

    /// Font size in text space units
    pub size: f32,
}

impl FontDirective {
    /// Create a font directive.
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Text decoded from one `BT ... ET` scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Font directive of the scope, if any
    pub font: Option<FontDirective>,

    /// Decoded runs: plain `Tj` runs first, then `TJ` runs
    pub runs: Vec<String>,
}

impl TextBlock {
    /// Concatenated text of the scope.
    pub fn plain_text(&self) -> String {
        self.runs.concat()
    }

    /// Check if the scope produced no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
