//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Page, PdfObject};

/// A scanned PDF document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Version from the `%PDF-` header (e.g., "1.7")
    pub version: Option<String>,

    /// Object count declared by the trailer `/Size`
    pub declared_size: u32,

    /// Text-bearing objects, in ascending id order
    pub objects: Vec<PdfObject>,

    /// Page objects, in ascending id order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an object by id.
    pub fn object(&self, id: u32) -> Option<&PdfObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get the number of page objects found.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Number of decoded text runs across all objects.
    pub fn run_count(&self) -> usize {
        self.objects.iter().map(|o| o.text_runs().count()).sum()
    }

    /// Check if the document has no objects at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.pages.is_empty()
    }

    /// All text runs concatenated in object-then-run order, no separators.
    pub fn plain_text(&self) -> String {
        self.objects
            .iter()
            .flat_map(|object| object.text_runs())
            .collect()
    }
}
