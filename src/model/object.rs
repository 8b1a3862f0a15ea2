//! Indirect object types.

use serde::{Deserialize, Serialize};

use super::{FontDirective, TextBlock};

/// Half-open byte range `[start, end)` inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl ByteRange {
    /// Create a range; `end` is clamped so the range is never inverted.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the covered bytes from `buf`.
    ///
    /// Panics if the range lies outside `buf`; ranges handed out by the
    /// scanner are always derived from the buffer they index.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// Object classification read from its `/Type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectType {
    /// No `/Type`, or a type this crate does not know.
    #[default]
    Undefined,
    /// Document catalog
    Catalog,
    /// Page tree node
    Pages,
    /// Single page
    Page,
    /// Annotation
    Annot,
    /// Font dictionary
    Font,
    /// External object (image, form)
    XObject,
    /// Optional content group
    Ocg,
}

impl ObjectType {
    /// Map a `/Type` name (without the leading `/`) to a classification.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Catalog" => ObjectType::Catalog,
            "Pages" => ObjectType::Pages,
            "Page" => ObjectType::Page,
            "Annot" => ObjectType::Annot,
            "Font" => ObjectType::Font,
            "XObject" => ObjectType::XObject,
            "OCG" => ObjectType::Ocg,
            _ => ObjectType::Undefined,
        }
    }
}

/// How an object's payload was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StreamKind {
    /// No compression filter; the object bytes were scanned directly.
    #[default]
    Uncompressed,
    /// Compressed stream, inflated before scanning.
    Compressed,
    /// Filter declared but the payload is not a zlib stream; scanned as is.
    Unsupported,
    /// Filter declared and inflating the payload failed.
    Corrupt,
}

/// An indirect object and the text decoded from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfObject {
    /// Object number (1-based)
    pub id: u32,

    /// Byte range of the object body in the document buffer
    pub range: ByteRange,

    /// Classification from `/Type`
    pub object_type: ObjectType,

    /// Payload resolution
    pub stream: StreamKind,

    /// Text-drawing scopes, in scan order
    pub text_blocks: Vec<TextBlock>,
}

impl PdfObject {
    /// Create an object with no decoded text.
    pub fn new(id: u32, range: ByteRange, object_type: ObjectType) -> Self {
        Self {
            id,
            range,
            object_type,
            stream: StreamKind::Uncompressed,
            text_blocks: Vec::new(),
        }
    }

    /// Whether the payload was inflated before scanning.
    pub fn is_compressed(&self) -> bool {
        self.stream == StreamKind::Compressed
    }

    /// All text runs of the object, in scan order.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.text_blocks
            .iter()
            .flat_map(|block| block.runs.iter().map(String::as_str))
    }

    /// Font directive in effect for the object: the last one seen.
    pub fn font(&self) -> Option<&FontDirective> {
        self.text_blocks
            .iter()
            .rev()
            .find_map(|block| block.font.as_ref())
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.text_runs().collect()
    }
}
