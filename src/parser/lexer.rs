//! Token location and value reading over raw document bytes.
//!
//! Every position returned by [`locate`] is the index of the **last** byte
//! of the match; callers add one to step past it.

use crate::error::{Error, Result};

use super::keywords::{self, CLOSE_ANGLE, SOLIDUS};

/// Find `pattern` in `buf` at or after `start`.
///
/// Returns the index of the last byte of the first full match. A pattern
/// that would run past the end of the buffer does not match.
pub fn locate(buf: &[u8], start: usize, pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || start >= buf.len() || buf.len() - start < pattern.len() {
        return None;
    }

    buf[start..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|offset| start + offset + pattern.len() - 1)
}

/// Find `op` as a standalone content-stream token at or after `start`.
///
/// The match must be bounded on both sides by the buffer edge, whitespace
/// or a delimiter, so `Tj` does not match inside `xTjy`.
pub fn locate_operator(buf: &[u8], start: usize, op: &[u8]) -> Option<usize> {
    locate_bounded(buf, start, op, |b| {
        keywords::is_whitespace(b) || keywords::is_delimiter(b)
    })
}

/// Find `word` bounded by whitespace or the buffer edge on both sides.
///
/// Stricter than [`locate_operator`]: `(BT)` inside a string does not match.
pub fn locate_word(buf: &[u8], start: usize, word: &[u8]) -> Option<usize> {
    locate_bounded(buf, start, word, keywords::is_whitespace)
}

fn locate_bounded(
    buf: &[u8],
    start: usize,
    token: &[u8],
    is_boundary: impl Fn(u8) -> bool,
) -> Option<usize> {
    let mut from = start;
    loop {
        let end = locate(buf, from, token)?;
        let first = end + 1 - token.len();

        let open = first == 0 || is_boundary(buf[first - 1]);
        let close = end + 1 >= buf.len() || is_boundary(buf[end + 1]);
        if open && close {
            return Some(end);
        }
        from = first + 1;
    }
}

/// Read bytes starting at `from` until `terminator`.
pub fn read_value(buf: &[u8], from: usize, terminator: u8) -> Result<String> {
    read_value_until(buf, from, &[terminator])
}

/// Read bytes starting at `from` until any of `terminators`.
///
/// Each byte becomes the char with the same code point. Running off the end
/// of the buffer is [`Error::BufferExhausted`].
pub fn read_value_until(buf: &[u8], from: usize, terminators: &[u8]) -> Result<String> {
    let exhausted = || Error::exhausted(from, describe(terminators));

    let tail = buf.get(from..).ok_or_else(exhausted)?;
    let len = tail
        .iter()
        .position(|b| terminators.contains(b))
        .ok_or_else(exhausted)?;

    Ok(bytes_to_string(&tail[..len]))
}

/// Read the value following the attribute `name`.
///
/// The value ends at the next `/` or `>`. An absent attribute yields an
/// empty string.
pub fn read_attribute(buf: &[u8], start: usize, name: &[u8]) -> Result<String> {
    match locate(buf, start, name) {
        Some(end) => read_value_until(buf, end + 1, &[SOLIDUS, CLOSE_ANGLE]),
        None => Ok(String::new()),
    }
}

/// Index of the first byte of the line that ends just before `pos`.
///
/// Walks backward over `buf[..pos]` to the byte after the previous LF or CR,
/// or to the start of the buffer.
pub fn line_start(buf: &[u8], pos: usize) -> Result<usize> {
    let head = buf
        .get(..pos)
        .ok_or_else(|| Error::exhausted(pos, "line start"))?;

    Ok(head
        .iter()
        .rposition(|&b| keywords::is_line_end(b))
        .map_or(0, |i| i + 1))
}

/// Map each byte to the char of the same code point.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn describe(terminators: &[u8]) -> String {
    terminators
        .iter()
        .map(|&b| format!("{:?}", b as char))
        .collect::<Vec<_>>()
        .join(" or ")
}
