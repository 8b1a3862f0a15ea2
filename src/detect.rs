//! PDF format detection and validation.

use crate::error::{Error, Result};
use crate::parser::keywords::{self, VERSION};
use crate::parser::lexer::{bytes_to_string, locate};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.4", "1.7")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// How far into a file the header is looked for.
const HEADER_WINDOW: u64 = 1024;

/// Detect PDF format from a file path.
///
/// Only the first kilobyte is read; the header of a legacy file may be
/// preceded by a little junk.
///
/// # Example
/// ```no_run
/// use pdfscan::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut header = Vec::new();
    BufReader::new(file)
        .take(HEADER_WINDOW)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect PDF format from bytes.
///
/// # Returns
/// * `Ok(PdfFormat)` if a `%PDF-x.y` header is present
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    detect_version(data)
        .map(|version| PdfFormat { version })
        .ok_or(Error::UnknownFormat)
}

/// Read the version from the first `%PDF-` header in the buffer.
///
/// The version runs up to the next whitespace and must look like `1.4`.
pub fn detect_version(data: &[u8]) -> Option<String> {
    let end = locate(data, 0, VERSION)?;
    let rest = &data[end + 1..];
    let len = rest
        .iter()
        .position(|&b| keywords::is_whitespace(b))
        .unwrap_or(rest.len());

    let version = bytes_to_string(&rest[..len]);
    is_valid_version(&version).then_some(version)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    match version.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Check whether a path has a `.pdf` extension, ignoring case.
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Validate a path before it is read.
///
/// # Errors
/// * [`Error::UnsupportedExtension`] when the extension is not `.pdf`
/// * [`Error::NotFound`] when no file exists at the path
pub fn check_extension<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !has_pdf_extension(path) {
        return Err(Error::UnsupportedExtension(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    Ok(())
}

/// Check if a file is a valid PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes contain a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
