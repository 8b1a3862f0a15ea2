//! Text-drawing scope decoding.
//!
//! A scope is the region between `BT` and `ET`. Inside it, the operand of a
//! drawing operator is recovered by walking back from the operator to the
//! start of its line (or to the end of the previous operator of the same
//! kind on that line). Literal strings are taken between the first `(` and
//! the next `)` with no escape or nesting support.

use encoding_rs::{Encoding, WINDOWS_1251};

use crate::error::Result;
use crate::model::{ByteRange, FontDirective, TextBlock};

use super::keywords::{
    self, BEGIN_TEXT, CLOSE_ANGLE, CLOSE_PAREN, CLOSE_SQUARE, END_TEXT, OPEN_ANGLE, OPEN_PAREN,
    OPEN_SQUARE, SOLIDUS, TEXT_FONT, TEXT_KERNED, TEXT_PLAIN,
};
use super::lexer::{bytes_to_string, line_start, locate_operator, locate_word};

/// Iterator over the `BT ... ET` scopes of a payload.
///
/// Each range covers the bytes after `BT` up to (not including) `ET`. Both
/// markers must stand between whitespace, so `(BT)` in a string is text. A
/// `BT` without a matching `ET` ends the iteration.
#[derive(Debug, Clone)]
pub struct TextScopes<'a> {
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> TextScopes<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0 }
    }
}

impl Iterator for TextScopes<'_> {
    type Item = ByteRange;

    fn next(&mut self) -> Option<ByteRange> {
        let begin = locate_word(self.buf, self.cursor, BEGIN_TEXT)?;
        let body_start = begin + 1;

        let Some(end) = locate_word(self.buf, body_start, END_TEXT) else {
            self.cursor = self.buf.len();
            return None;
        };
        self.cursor = end + 1;

        Some(ByteRange::new(body_start, end + 1 - END_TEXT.len()))
    }
}

/// An operator occurrence and the operand bytes in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand<'a> {
    /// Index of the first byte of the operator
    pub at: usize,
    /// Bytes from the line start (or previous operator) to the operator
    pub bytes: &'a [u8],
}

/// Every occurrence of `op` in `scope` with its operand.
pub fn operands<'a>(scope: &'a [u8], op: &[u8]) -> Result<Vec<Operand<'a>>> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(end) = locate_operator(scope, cursor, op) {
        let at = end + 1 - op.len();
        let from = line_start(scope, at)?.max(cursor);
        found.push(Operand {
            at,
            bytes: &scope[from..at],
        });
        cursor = end + 1;
    }

    Ok(found)
}

/// Decodes text scopes into runs.
#[derive(Debug, Clone, Copy)]
pub struct TextDecoder {
    code_page: &'static Encoding,
}

impl TextDecoder {
    /// Create a decoder that reads hex strings in `code_page`.
    pub fn new(code_page: &'static Encoding) -> Self {
        Self { code_page }
    }

    /// Decode every scope of a resolved payload.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<TextBlock>> {
        TextScopes::new(payload)
            .map(|scope| self.decode_scope(scope.slice(payload)))
            .collect()
    }

    /// Decode one scope: font setup, then the `Tj` pass, then the `TJ` pass.
    pub fn decode_scope(&self, scope: &[u8]) -> Result<TextBlock> {
        let mut block = TextBlock {
            font: font_directive(scope)?,
            runs: Vec::new(),
        };

        for operand in operands(scope, TEXT_PLAIN)? {
            if let Some(run) = self.plain_run(operand.bytes) {
                block.runs.push(run);
            }
        }
        for operand in operands(scope, TEXT_KERNED)? {
            if let Some(run) = kerned_text(operand.bytes) {
                block.runs.push(run);
            }
        }

        Ok(block)
    }

    /// Decode a `Tj` operand: a literal string, or failing that a hex string.
    pub fn plain_run(&self, operand: &[u8]) -> Option<String> {
        if let Some(open) = find(operand, OPEN_PAREN) {
            let body = &operand[open + 1..];
            let text = match find(body, CLOSE_PAREN) {
                Some(close) => &body[..close],
                None => trim_end(body),
            };
            return Some(bytes_to_string(text));
        }

        let open = find(operand, OPEN_ANGLE)?;
        let body = &operand[open + 1..];
        let digits = match find(body, CLOSE_ANGLE) {
            Some(close) => &body[..close],
            None => body,
        };

        match decode_hex(digits) {
            Some(bytes) => {
                let (text, _) = self.code_page.decode_without_bom_handling(&bytes);
                Some(text.into_owned())
            }
            None => {
                log::debug!("Dropping malformed hex string {:?}", bytes_to_string(digits));
                None
            }
        }
    }
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self::new(WINDOWS_1251)
    }
}

/// Decode hex digit pairs into bytes.
///
/// Whitespace is ignored and an odd final digit is padded with `0`. Any
/// other non-hex byte makes the whole string invalid.
pub fn decode_hex(digits: &[u8]) -> Option<Vec<u8>> {
    let nibbles = digits
        .iter()
        .filter(|&&b| !keywords::is_whitespace(b))
        .map(|&b| char::from(b).to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;

    Some(
        nibbles
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
            .collect(),
    )
}

/// Concatenate the parenthesized parts of a `TJ` operand.
///
/// Numeric kerning adjustments between the parts are dropped. Returns
/// `None` when no text is left.
pub fn kerned_text(operand: &[u8]) -> Option<String> {
    let body = match find(operand, OPEN_SQUARE) {
        Some(open) => {
            let inner = &operand[open + 1..];
            match inner.iter().rposition(|&b| b == CLOSE_SQUARE) {
                Some(close) => &inner[..close],
                None => inner,
            }
        }
        None => operand,
    };

    let mut text = String::new();
    let mut rest = body;
    while let Some(open) = find(rest, OPEN_PAREN) {
        let after = &rest[open + 1..];
        let Some(close) = find(after, CLOSE_PAREN) else {
            break;
        };
        text.extend(after[..close].iter().map(|&b| b as char));
        rest = &after[close + 1..];
    }

    (!text.is_empty()).then_some(text)
}

/// Font directive of a scope.
///
/// The last `Tf` before the first drawing operator wins; if every `Tf`
/// comes after drawing starts, the first one is used.
fn font_directive(scope: &[u8]) -> Result<Option<FontDirective>> {
    let first_draw = [TEXT_PLAIN, TEXT_KERNED]
        .iter()
        .filter_map(|op| locate_operator(scope, 0, op))
        .min()
        .unwrap_or(usize::MAX);

    let fonts = operands(scope, TEXT_FONT)?;
    let chosen = fonts
        .iter()
        .rev()
        .find(|operand| operand.at < first_draw)
        .or(fonts.first());

    Ok(chosen.and_then(|operand| parse_font(operand.bytes)))
}

/// Parse a `/<name> <size>` font operand.
fn parse_font(operand: &[u8]) -> Option<FontDirective> {
    let slash = operand.iter().rposition(|&b| b == SOLIDUS)?;
    let text = bytes_to_string(&operand[slash + 1..]);

    let mut parts = text.split_ascii_whitespace();
    let name = parts.next()?;
    let size = parts.next()?.parse::<f32>().ok()?;
    Some(FontDirective::new(name, size))
}

fn find(bytes: &[u8], needle: u8) -> Option<usize> {
    bytes.iter().position(|&b| b == needle)
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let len = bytes
        .iter()
        .rposition(|&b| !keywords::is_whitespace(b))
        .map_or(0, |i| i + 1);
    &bytes[..len]
}
