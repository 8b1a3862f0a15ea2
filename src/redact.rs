//! In-place text redaction.
//!
//! Every compressed stream is inflated, its text-drawing lines are zeroed,
//! and the recompressed bytes are written back over the original payload.
//! The document never changes length: a shorter payload leaves the old tail
//! bytes behind the new zlib stream, a longer one is cut to fit.
//! Uncompressed scopes outside those streams are zeroed directly.

use serde::Serialize;

use crate::codec::{has_zlib_signature, FlateCodec, StreamCodec};
use crate::error::Result;
use crate::model::ByteRange;
use crate::parser::keywords::{END_STREAM, FLATE_DECODE, STREAM, TEXT_KERNED, TEXT_PLAIN};
use crate::parser::lexer::{line_start, locate, locate_operator};
use crate::parser::stream::{before_keyword, strip_line_terminators};
use crate::parser::TextScopes;

/// Summary of a redaction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RedactionReport {
    /// Filtered streams encountered
    pub streams_found: usize,
    /// Streams recompressed and written back
    pub streams_rewritten: usize,
    /// Streams left untouched because they could not be inflated
    pub streams_skipped: usize,
    /// Rewritten streams whose new payload had to be cut
    pub truncated: usize,
    /// Text-drawing operators zeroed
    pub lines_erased: usize,
}

impl RedactionReport {
    /// Whether anything in the document was changed.
    pub fn is_modified(&self) -> bool {
        self.lines_erased > 0
    }
}

/// Rewrites documents with their text removed.
#[derive(Debug, Clone)]
pub struct Redactor<C = FlateCodec> {
    codec: C,
}

impl Redactor<FlateCodec> {
    /// Create a redactor recompressing at the best level.
    pub fn new() -> Self {
        Self {
            codec: FlateCodec::best(),
        }
    }
}

impl Default for Redactor<FlateCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamCodec> Redactor<C> {
    /// Create a redactor with a custom codec.
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Redact `buf` in place.
    pub fn redact(&self, buf: &mut [u8]) -> Result<RedactionReport> {
        let mut report = RedactionReport::default();
        let mut spans: Vec<ByteRange> = Vec::new();
        let mut cursor = 0;

        while let Some(marker) = locate(buf, cursor, FLATE_DECODE) {
            let Some(keyword) = locate(buf, marker + 1, STREAM) else {
                break;
            };
            let start = keyword + 1;
            let Some(closer) = locate(buf, start, END_STREAM) else {
                log::warn!("Stream at offset {} has no endstream", start);
                break;
            };
            cursor = closer + 1;
            report.streams_found += 1;

            let Some(nominal_end) = before_keyword(closer, END_STREAM) else {
                report.streams_skipped += 1;
                continue;
            };
            let span = match strip_line_terminators(buf, start, nominal_end) {
                Ok(span) => span,
                Err(e) => {
                    log::warn!("Skipping stream at offset {}: {}", start, e);
                    report.streams_skipped += 1;
                    continue;
                }
            };

            let raw = span.slice(buf);
            if !has_zlib_signature(raw) {
                log::debug!("Stream at offset {} has no zlib header", span.start);
                report.streams_skipped += 1;
                continue;
            }
            spans.push(span);

            let mut content = match self.codec.inflate(raw) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping stream at offset {}: {}", span.start, e);
                    report.streams_skipped += 1;
                    continue;
                }
            };

            let packed = match erase_text(&mut content) {
                Ok(0) => continue,
                Ok(erased) => self.codec.deflate(&content).map(|packed| (erased, packed)),
                Err(e) => Err(e),
            };
            let (erased, packed) = match packed {
                Ok(packed) => packed,
                Err(e) => {
                    log::warn!("Leaving stream at offset {} untouched: {}", span.start, e);
                    report.streams_skipped += 1;
                    continue;
                }
            };
            report.lines_erased += erased;

            let target = &mut buf[span.start..span.end];
            if packed.len() > target.len() {
                log::warn!(
                    "Recompressed stream at offset {} is {} bytes, truncating to {}",
                    span.start,
                    packed.len(),
                    target.len()
                );
                report.truncated += 1;
            }
            let n = packed.len().min(target.len());
            target[..n].copy_from_slice(&packed[..n]);
            report.streams_rewritten += 1;
        }

        // uncompressed text between the processed streams
        let mut from = 0;
        let tail = ByteRange::new(buf.len(), buf.len());
        for span in spans.iter().chain(std::iter::once(&tail)) {
            if span.start > from {
                report.lines_erased += erase_text(&mut buf[from..span.start])?;
            }
            from = from.max(span.end);
        }

        log::debug!(
            "Redacted {} operators in {} of {} streams",
            report.lines_erased,
            report.streams_rewritten,
            report.streams_found
        );
        Ok(report)
    }
}

/// Redact `buf` in place with the default redactor.
pub fn redact(buf: &mut [u8]) -> Result<RedactionReport> {
    Redactor::new().redact(buf)
}

/// Zero every text-drawing line inside the scopes of `buf`.
///
/// Each line is zeroed from its start (never before the scope start)
/// through the last byte of the operator; the line terminator stays.
/// Returns the number of operators erased.
pub fn erase_text(buf: &mut [u8]) -> Result<usize> {
    let scopes: Vec<ByteRange> = TextScopes::new(buf).collect();
    let mut erased = 0;

    for scope in scopes {
        for op in [TEXT_PLAIN, TEXT_KERNED] {
            let mut cursor = scope.start;
            while let Some(end) = locate_operator(&buf[..scope.end], cursor, op) {
                let at = end + 1 - op.len();
                let from = scope.start + line_start(&buf[scope.start..], at - scope.start)?;
                buf[from..=end].fill(0);
                erased += 1;
                cursor = end + 1;
            }
        }
    }

    Ok(erased)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn compressed_object(content: &[u8]) -> Vec<u8> {
        let compressed = FlateCodec::new().deflate(content).unwrap();
        let mut doc = format!(
            "%PDF-1.4\n1 0 obj\n<< /Length {}/Filter/FlateDecode >>\nstream\r\n",
            compressed.len()
        )
        .into_bytes();
        doc.extend_from_slice(&compressed);
        doc.extend_from_slice(b"\r\nendstream\nendobj\ntrailer\n<< /Size 2 >>\n");
        doc
    }

    fn payload(doc: &[u8]) -> Vec<u8> {
        let start = locate(doc, 0, b"stream\r\n").unwrap() + 1;
        let end = locate(doc, start, b"\r\nendstream").unwrap() + 1 - b"\r\nendstream".len();
        FlateCodec::new().inflate(&doc[start..end]).unwrap()
    }

    #[test]
    fn test_erase_text_keeps_font_line() {
        let mut content = b"BT\n/F1 12 Tf\n(Hello) Tj\nET\n".to_vec();
        let erased = erase_text(&mut content).unwrap();

        assert_eq!(erased, 1);
        let mut expected = b"BT\n/F1 12 Tf\n".to_vec();
        expected.extend_from_slice(&[0; 10]);
        expected.extend_from_slice(b"\nET\n");
        assert_eq!(content, expected);
    }

    #[test]
    fn test_erase_text_bounded_by_scope_start() {
        let mut content = b"BT (A) Tj ET".to_vec();
        assert_eq!(erase_text(&mut content).unwrap(), 1);
        assert_eq!(&content[..2], b"BT");
        assert!(content[2..9].iter().all(|&b| b == 0));
        assert_eq!(&content[9..], b" ET");
    }

    #[test]
    fn test_erase_text_both_operators() {
        let mut content = b"BT\n[(Hel) -20 (lo)] TJ\n<48> Tj\nET\nq 1 0 0 1 0 0 cm Q\n".to_vec();
        let len = content.len();

        assert_eq!(erase_text(&mut content).unwrap(), 2);
        assert_eq!(content.len(), len);
        assert!(content.ends_with(b"\nET\nq 1 0 0 1 0 0 cm Q\n"));
        let blocks = crate::parser::TextDecoder::default().decode(&content).unwrap();
        assert!(blocks[0].runs.is_empty());
    }

    #[test]
    fn test_erase_text_outside_scope_untouched() {
        let mut content = b"(Loose) Tj\n".to_vec();
        assert_eq!(erase_text(&mut content).unwrap(), 0);
        assert_eq!(content, b"(Loose) Tj\n");
    }

    #[test]
    fn test_redact_compressed_stream() {
        let content = b"BT\n/F1 12 Tf\n(Hello) Tj\nET\n";
        let mut doc = compressed_object(content);
        let len = doc.len();

        let report = redact(&mut doc).unwrap();

        assert_eq!(doc.len(), len);
        assert_eq!(report.streams_found, 1);
        assert_eq!(report.streams_rewritten, 1);
        assert_eq!(report.truncated, 0);
        assert_eq!(report.lines_erased, 1);

        let inflated = payload(&doc);
        assert_eq!(inflated.len(), content.len());
        assert!(inflated.starts_with(b"BT\n/F1 12 Tf\n"));
        assert!(inflated[13..23].iter().all(|&b| b == 0));
        assert!(inflated.ends_with(b"\nET\n"));
    }

    #[test]
    fn test_redact_without_text_leaves_buffer() {
        let mut doc = compressed_object(b"q 1 0 0 1 0 0 cm Q\n");
        let original = doc.clone();

        let report = redact(&mut doc).unwrap();
        assert_eq!(doc, original);
        assert_eq!(report.streams_found, 1);
        assert_eq!(report.streams_rewritten, 0);
        assert!(!report.is_modified());
    }

    #[test]
    fn test_redact_uncompressed_scopes() {
        let mut doc = b"%PDF-1.4\n1 0 obj\n<< /Length 30 >>\nstream\nBT\n/F1 12 Tf\n(Hello) Tj\nET\nendstream\nendobj\n".to_vec();
        let len = doc.len();

        let report = redact(&mut doc).unwrap();
        assert_eq!(doc.len(), len);
        assert_eq!(report.streams_found, 0);
        assert_eq!(report.lines_erased, 1);
        assert!(locate(&doc, 0, b"/F1 12 Tf").is_some());
        assert!(locate(&doc, 0, b"Hello").is_none());
    }

    #[test]
    fn test_redact_filtered_stream_without_zlib_header() {
        let mut doc = b"\n1 0 obj\n<< /Filter/FlateDecode >>\nstream\r\nBT\n(Hi) Tj\nET\r\nendstream\nendobj\n".to_vec();

        let report = redact(&mut doc).unwrap();
        assert_eq!(report.streams_skipped, 1);
        assert_eq!(report.lines_erased, 1);
        assert!(locate(&doc, 0, b"(Hi)").is_none());
    }

    struct InflatingCodec;

    impl StreamCodec for InflatingCodec {
        fn inflate(&self, input: &[u8]) -> Result<Vec<u8>> {
            FlateCodec::new().inflate(input)
        }

        fn deflate(&self, _input: &[u8]) -> Result<Vec<u8>> {
            Ok(vec![0xAB; 4096])
        }
    }

    #[test]
    fn test_redact_truncates_longer_output() {
        let mut doc = compressed_object(b"BT\n(Hello) Tj\nET\n");
        let len = doc.len();

        let report = Redactor::with_codec(InflatingCodec).redact(&mut doc).unwrap();
        assert_eq!(doc.len(), len);
        assert_eq!(report.truncated, 1);
        assert!(doc.ends_with(b"\r\nendstream\nendobj\ntrailer\n<< /Size 2 >>\n"));
    }

    struct FailingCodec;

    impl StreamCodec for FailingCodec {
        fn inflate(&self, _input: &[u8]) -> Result<Vec<u8>> {
            Err(Error::Decode("bad stream".to_string()))
        }

        fn deflate(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.to_vec())
        }
    }

    #[test]
    fn test_redact_skips_undecodable_stream() {
        let mut doc = compressed_object(b"BT\n(Hello) Tj\nET\n");
        let original = doc.clone();

        let report = Redactor::with_codec(FailingCodec).redact(&mut doc).unwrap();
        assert_eq!(report.streams_skipped, 1);
        assert_eq!(doc, original);
    }

    struct ReadOnlyCodec;

    impl StreamCodec for ReadOnlyCodec {
        fn inflate(&self, input: &[u8]) -> Result<Vec<u8>> {
            FlateCodec::new().inflate(input)
        }

        fn deflate(&self, _input: &[u8]) -> Result<Vec<u8>> {
            Err(Error::Decode("compression unavailable".to_string()))
        }
    }

    #[test]
    fn test_redact_continues_after_recompression_failure() {
        let mut doc = compressed_object(b"BT\n(Hello) Tj\nET\n");
        let stream_end = doc.len();
        doc.extend_from_slice(b"2 0 obj\nBT\n(Loose) Tj\nET\nendobj\n");
        let original = doc.clone();

        let report = Redactor::with_codec(ReadOnlyCodec).redact(&mut doc).unwrap();

        assert_eq!(report.streams_found, 1);
        assert_eq!(report.streams_skipped, 1);
        assert_eq!(report.streams_rewritten, 0);
        assert_eq!(report.lines_erased, 1);
        assert_eq!(&doc[..stream_end], &original[..stream_end]);
        assert!(locate(&doc, 0, b"(Loose)").is_none());
    }
}
