//! Parsing options and configuration.

use encoding_rs::{Encoding, WINDOWS_1251};

/// Options for parsing PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Legacy code page used to read hex strings
    pub code_page: &'static Encoding,

    /// Whether page objects are collected with their boxes
    pub extract_pages: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first object that cannot be decoded.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip objects that cannot be decoded and continue.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the code page for hex strings.
    pub fn with_code_page(mut self, code_page: &'static Encoding) -> Self {
        self.code_page = code_page;
        self
    }

    /// Set the code page from a WHATWG label such as `"windows-1252"`.
    ///
    /// Returns `None` for an unknown label.
    pub fn with_code_page_label(self, label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(|code_page| self.with_code_page(code_page))
    }

    /// Enable or disable page collection.
    pub fn with_pages(mut self, extract: bool) -> Self {
        self.extract_pages = extract;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            code_page: WINDOWS_1251,
            extract_pages: true,
        }
    }
}

/// Error handling mode for per-object failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any object error
    Strict,
    /// Log object errors and continue with the next object
    #[default]
    Lenient,
}
