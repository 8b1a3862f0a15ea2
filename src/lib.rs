//! # pdfscan
//!
//! Text extraction and in-place text redaction for legacy PDF files.
//!
//! The scanner works directly on the raw document bytes: it probes
//! indirect objects by id, inflates `FlateDecode` streams and decodes the
//! literal, hex and kerned strings drawn inside `BT ... ET` scopes. No
//! cross-reference table or object graph is built.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfscan::{parse_file, render};
//!
//! fn main() -> pdfscan::Result<()> {
//!     let doc = parse_file("document.pdf")?;
//!     println!("{}", render::to_text(&doc)?);
//!
//!     // Remove the text, keeping every byte offset intact
//!     let redacted = pdfscan::redact_file("document.pdf")?;
//!     std::fs::write("redacted.pdf", redacted)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Byte-level scanning**: tolerant of missing tokens and broken objects
//! - **Legacy code pages**: hex strings decoded through `encoding_rs`
//! - **Length-preserving redaction**: recompressed streams fit their original span
//! - **JSON output**: the scanned object model serializes with `serde`

pub mod codec;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod redact;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use codec::{FlateCodec, StreamCodec};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    ByteRange, Document, FontDirective, ObjectType, Page, PdfObject, Rect, StreamKind, TextBlock,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use redact::{redact, RedactionReport, Redactor};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a PDF file and return the scanned document.
///
/// # Example
///
/// ```no_run
/// use pdfscan::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Objects: {}", doc.objects.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfscan::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .strict()
///     .with_code_page(encoding_rs::WINDOWS_1252);
/// let doc = parse_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = PdfParser::from_reader(reader)?;
    parser.parse()
}

/// Extract plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfscan::extract_text;
///
/// let text = extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Extract plain text from PDF bytes.
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String> {
    let doc = parse_bytes(data)?;
    Ok(doc.plain_text())
}

/// Convert a PDF file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Return a redacted copy of `data`.
///
/// The copy has the same length as the input.
pub fn redact_bytes(data: &[u8]) -> Result<(Vec<u8>, RedactionReport)> {
    if data.is_empty() {
        return Err(Error::InvalidInput("document buffer is empty".to_string()));
    }

    let mut buf = data.to_vec();
    let report = redact(&mut buf)?;
    Ok((buf, report))
}

/// Read a PDF file and return its redacted bytes.
///
/// The file itself is not modified.
///
/// # Example
///
/// ```no_run
/// let redacted = pdfscan::redact_file("document.pdf").unwrap();
/// std::fs::write("redacted.pdf", redacted).unwrap();
/// ```
pub fn redact_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    detect::check_extension(path)?;

    let data = std::fs::read(path)?;
    let (buf, report) = redact_bytes(&data)?;
    log::debug!("{}: {:?}", path.display(), report);
    Ok(buf)
}
