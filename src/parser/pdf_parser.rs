//! PDF document parser.

use std::io::Read;
use std::path::Path;

use crate::codec::FlateCodec;
use crate::detect::{check_extension, detect_version};
use crate::error::{Error, Result};
use crate::model::{Document, ObjectType, PdfObject, StreamKind};

use super::object::{self, ObjectLocator, SequentialProbe};
use super::options::{ErrorMode, ParseOptions};
use super::stream;
use super::text::TextDecoder;

/// PDF document parser.
///
/// Owns the document buffer; [`PdfParser::parse`] only reads it.
pub struct PdfParser {
    data: Vec<u8>,
    options: ParseOptions,
    codec: FlateCodec,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        check_extension(path)?;

        let data = std::fs::read(path)?;
        Self::from_vec_with_options(data, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::from_vec_with_options(data.to_vec(), options)
    }

    /// Parse a PDF from an owned buffer with custom options.
    pub fn from_vec_with_options(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidInput("document buffer is empty".to_string()));
        }

        Ok(Self {
            data,
            options,
            codec: FlateCodec::new(),
        })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec_with_options(data, options)
    }

    /// The document buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parse the document using sequential id probing.
    pub fn parse(&self) -> Result<Document> {
        self.parse_with(&SequentialProbe)
    }

    /// Parse the document using a custom object locator.
    pub fn parse_with(&self, locator: &dyn ObjectLocator) -> Result<Document> {
        let buf = self.data.as_slice();
        let decoder = TextDecoder::new(self.options.code_page);

        let mut document = Document::new();
        document.version = detect_version(buf);
        document.declared_size = object::declared_object_count(buf);

        for id in locator.candidate_ids(buf) {
            let range = match locator.locate(buf, id) {
                Ok(Some(range)) => range,
                Ok(None) => {
                    log::debug!("Object {} not present, skipping", id);
                    continue;
                }
                Err(e) => {
                    self.recover(id, e)?;
                    continue;
                }
            };

            let bytes = range.slice(buf);
            let object_type = object::object_type(bytes);

            if object_type == ObjectType::Page {
                if self.options.extract_pages {
                    document.pages.push(object::parse_page(id, range, bytes));
                }
                continue;
            }

            let mut pdf_object = PdfObject::new(id, range, object_type);
            let decoded = stream::resolve(bytes, &self.codec).and_then(|resolved| {
                pdf_object.stream = resolved.kind;
                decoder.decode(&resolved.payload)
            });
            match decoded {
                Ok(blocks) => pdf_object.text_blocks = blocks,
                Err(e) => {
                    if matches!(e, Error::Decode(_)) {
                        pdf_object.stream = StreamKind::Corrupt;
                    }
                    self.recover(id, e)?;
                }
            }
            document.objects.push(pdf_object);
        }

        log::debug!(
            "Parsed {} objects and {} pages ({} declared)",
            document.objects.len(),
            document.pages.len(),
            document.declared_size
        );
        Ok(document)
    }

    /// Apply the error mode to a per-object failure.
    fn recover(&self, id: u32, error: Error) -> Result<()> {
        match self.options.error_mode {
            ErrorMode::Strict => Err(error),
            ErrorMode::Lenient => {
                log::warn!("Skipping text of object {}: {}", id, error);
                Ok(())
            }
        }
    }
}
