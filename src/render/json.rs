//! JSON rendering for scanned documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ByteRange, FontDirective, ObjectType, PdfObject, TextBlock};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.version = Some("1.4".to_string());
        doc.declared_size = 3;

        let mut object = PdfObject::new(2, ByteRange::new(10, 80), ObjectType::Undefined);
        object.text_blocks.push(TextBlock {
            font: Some(FontDirective::new("F1", 12.0)),
            runs: vec!["Hello".to_string()],
        });
        doc.objects.push(object);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["objects"][0]["text_blocks"][0]["font"]["name"], "F1");
        assert_eq!(value["declared_size"], 3);
    }
}
