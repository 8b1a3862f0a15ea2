//! Plain text rendering for scanned documents.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text.
///
/// Runs are concatenated in object order with no separators.
pub fn to_text(doc: &Document) -> Result<String> {
    Ok(doc.plain_text())
}
