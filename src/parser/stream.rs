//! Stream payload isolation and decompression.

use std::borrow::Cow;

use crate::codec::{has_zlib_signature, StreamCodec};
use crate::error::{Error, Result};
use crate::model::{ByteRange, StreamKind};

use super::keywords::{CARRIAGE_RETURN, END_STREAM, FLATE_DECODE, LINE_FEED, STREAM, STREAM_LENGTH};
use super::lexer::{locate, read_attribute};

/// An object payload ready for the text decoder.
#[derive(Debug, Clone)]
pub struct ResolvedStream<'a> {
    /// How the payload was obtained
    pub kind: StreamKind,

    /// Raw stream bytes inside the object, when a stream was isolated
    pub span: Option<ByteRange>,

    /// Bytes to scan: the object itself or the inflated stream
    pub payload: Cow<'a, [u8]>,
}

impl<'a> ResolvedStream<'a> {
    fn raw(kind: StreamKind, span: Option<ByteRange>, object: &'a [u8]) -> Self {
        Self {
            kind,
            span,
            payload: Cow::Borrowed(object),
        }
    }
}

/// Check whether the object declares the compression filter.
pub fn has_filter(object: &[u8]) -> bool {
    locate(object, 0, FLATE_DECODE).is_some()
}

/// Resolve the payload of one object.
///
/// Objects without the filter are scanned as they are, and so are objects
/// whose stream does not carry a zlib header. A payload the codec rejects is
/// [`Error::Decode`].
pub fn resolve<'a>(object: &'a [u8], codec: &dyn StreamCodec) -> Result<ResolvedStream<'a>> {
    if !has_filter(object) {
        return Ok(ResolvedStream::raw(StreamKind::Uncompressed, None, object));
    }

    let Some(span) = payload_span(object)? else {
        log::warn!("Filter declared but no stream keyword, scanning object as text");
        return Ok(ResolvedStream::raw(StreamKind::Unsupported, None, object));
    };

    let raw = span.slice(object);
    if !has_zlib_signature(raw) {
        log::debug!(
            "Stream of {} bytes has no zlib header, scanning object as text",
            raw.len()
        );
        return Ok(ResolvedStream::raw(
            StreamKind::Unsupported,
            Some(span),
            object,
        ));
    }

    let decoded = codec.inflate(raw)?;
    Ok(ResolvedStream {
        kind: StreamKind::Compressed,
        span: Some(span),
        payload: Cow::Owned(decoded),
    })
}

/// Locate the raw stream bytes of an object.
///
/// The payload starts one byte after the `stream` keyword and its nominal
/// end is `start + /Length + 1`; without a usable `/Length` (absent,
/// indirect, or pointing past the object) the byte before `endstream` is
/// used instead. Line terminators are then stripped with
/// [`strip_line_terminators`]. Returns `None` when there is no `stream`
/// keyword.
pub fn payload_span(object: &[u8]) -> Result<Option<ByteRange>> {
    let length = read_attribute(object, 0, STREAM_LENGTH)?.trim().parse::<usize>().ok();

    let Some(keyword) = locate(object, 0, STREAM) else {
        return Ok(None);
    };
    let start = keyword + 1;

    let declared_end = length
        .and_then(|length| start.checked_add(length)?.checked_add(1))
        .filter(|&end| end < object.len());
    if let (Some(length), None) = (length, declared_end) {
        log::debug!("/Length {} runs past the object", length);
    }

    let nominal_end = match declared_end {
        Some(end) => end,
        None => {
            log::debug!("No usable /Length, falling back to endstream");
            let end = locate(object, start, END_STREAM)
                .ok_or_else(|| Error::exhausted(start, "endstream"))?;
            before_keyword(end, END_STREAM)
                .ok_or_else(|| Error::exhausted(start, "stream payload"))?
        }
    };

    strip_line_terminators(object, start, nominal_end).map(Some)
}

/// Index of the byte just before a keyword whose last byte is at `end`.
pub(crate) fn before_keyword(end: usize, keyword: &[u8]) -> Option<usize> {
    (end + 1).checked_sub(keyword.len() + 1)
}

/// Drop one line terminator at each end of a stream payload.
///
/// `start` is the first byte after the `stream` keyword and `end` the
/// nominal last byte (inclusive). Leading: CRLF counts as one unit, else a
/// lone LF or CR. Trailing: `b[end-1], b[end]` forming CRLF drops both, a
/// LF at `end - 1` drops one, a CR or LF at `end` drops one. The result is
/// half-open.
pub fn strip_line_terminators(buf: &[u8], start: usize, end: usize) -> Result<ByteRange> {
    if end == 0 || end >= buf.len() {
        return Err(Error::exhausted(end, "stream payload end"));
    }

    let start = match (buf.get(start), buf.get(start + 1)) {
        (Some(&CARRIAGE_RETURN), Some(&LINE_FEED)) => start + 2,
        (Some(&LINE_FEED | &CARRIAGE_RETURN), _) => start + 1,
        _ => start,
    };

    let (prev, last) = (buf[end - 1], buf[end]);
    let dropped = if prev == CARRIAGE_RETURN && last == LINE_FEED {
        2
    } else if prev == LINE_FEED || last == CARRIAGE_RETURN || last == LINE_FEED {
        1
    } else {
        0
    };

    Ok(ByteRange::new(start, end + 1 - dropped))
}
