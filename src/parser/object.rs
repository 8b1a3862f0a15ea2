//! Indirect object location.
//!
//! Objects are found by probing ids `1..N` where `N` is the trailer's
//! declared `/Size`, capped at the buffer length; no cross-reference table
//! is read. The probing strategy
//! sits behind [`ObjectLocator`] so an offset-table based locator can replace
//! it without touching the decoders.

use crate::error::{Error, Result};
use crate::model::{ByteRange, ObjectType, Page, Rect};

use super::keywords::{
    self, ART_BOX, BLEED_BOX, CARRIAGE_RETURN, CLOSE_ANGLE, CLOSE_SQUARE, END_OBJECT, LINE_FEED,
    MEDIA_BOX, OBJECT, OPEN_SQUARE, SIZE, SOLIDUS, TRAILER, TRIM_BOX, TYPE,
};
use super::lexer::{bytes_to_string, locate, read_value, read_value_until};

/// Strategy for finding indirect objects in a document buffer.
pub trait ObjectLocator {
    /// Object ids worth probing, in the order they should be visited.
    fn candidate_ids<'a>(&self, buf: &'a [u8]) -> Box<dyn Iterator<Item = u32> + 'a>;

    /// Byte range of object `id`, or `None` if the document has no such object.
    fn locate(&self, buf: &[u8], id: u32) -> Result<Option<ByteRange>>;
}

/// Probes every id below the trailer's declared `/Size`.
///
/// The bound is capped at the buffer length, since every object marker
/// takes more than one byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialProbe;

impl ObjectLocator for SequentialProbe {
    fn candidate_ids<'a>(&self, buf: &'a [u8]) -> Box<dyn Iterator<Item = u32> + 'a> {
        let declared = declared_object_count(buf);
        let limit = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        if declared > limit {
            log::warn!(
                "Trailer /Size {} exceeds the {} byte document, probing ids below {}",
                declared,
                buf.len(),
                limit
            );
        }
        Box::new(1..declared.min(limit))
    }

    fn locate(&self, buf: &[u8], id: u32) -> Result<Option<ByteRange>> {
        extract_object(buf, 0, id)
    }
}

/// Read the trailer's declared `/Size`.
///
/// A missing trailer or an unreadable value counts as zero objects.
pub fn declared_object_count(buf: &[u8]) -> u32 {
    let Some(trailer) = locate(buf, 0, TRAILER) else {
        log::debug!("No trailer found, document declares no objects");
        return 0;
    };
    let Some(size) = locate(buf, trailer, SIZE) else {
        log::debug!("Trailer has no /Size, document declares no objects");
        return 0;
    };

    match read_value_until(buf, size + 1, &[SOLIDUS, CLOSE_ANGLE]) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Unreadable trailer /Size {:?}", value.trim());
            0
        }),
        Err(e) => {
            log::warn!("Unterminated trailer /Size: {}", e);
            0
        }
    }
}

/// Find the body of object `id` at or after `start`.
///
/// The marker `"<id> 0 obj"` must follow a line feed, or failing that a
/// carriage return. The range runs from the byte after the marker to the
/// `endobj` keyword, with whitespace before the keyword left out.
pub fn extract_object(buf: &[u8], start: usize, id: u32) -> Result<Option<ByteRange>> {
    let marker = format!("{} 0 {}", id, OBJECT);

    let found = [LINE_FEED, CARRIAGE_RETURN].iter().find_map(|&lead| {
        let mut pattern = Vec::with_capacity(marker.len() + 1);
        pattern.push(lead);
        pattern.extend_from_slice(marker.as_bytes());
        locate(buf, start, &pattern)
    });
    let Some(marker_end) = found else {
        return Ok(None);
    };

    let body_start = marker_end + 1;
    let closer_end = locate(buf, body_start, END_OBJECT)
        .ok_or_else(|| Error::exhausted(body_start, "endobj"))?;
    let closer_start = closer_end + 1 - END_OBJECT.len();

    let end = buf[body_start..closer_start]
        .iter()
        .rposition(|&b| !keywords::is_whitespace(b))
        .map_or(body_start, |i| body_start + i + 1);

    Ok(Some(ByteRange::new(body_start, end)))
}

/// Classify an object body by its `/Type` name.
pub fn object_type(bytes: &[u8]) -> ObjectType {
    match locate(bytes, 0, TYPE).and_then(|end| read_name(bytes, end + 1)) {
        Some(name) => ObjectType::from_name(&name),
        None => ObjectType::Undefined,
    }
}

/// Read a `/Name` token starting at `from`, skipping leading whitespace.
fn read_name(bytes: &[u8], from: usize) -> Option<String> {
    let rest = bytes.get(from..)?;
    let skip = rest.iter().position(|&b| !keywords::is_whitespace(b))?;
    let rest = &rest[skip..];
    if rest.first() != Some(&SOLIDUS) {
        return None;
    }

    let name = &rest[1..];
    let len = name
        .iter()
        .position(|&b| keywords::is_whitespace(b) || keywords::is_delimiter(b))
        .unwrap_or(name.len());
    (len > 0).then(|| bytes_to_string(&name[..len]))
}

/// Build a page from a page object body.
pub fn parse_page(id: u32, range: ByteRange, bytes: &[u8]) -> Page {
    let mut page = Page::new(id, range);
    page.media_box = read_box(bytes, MEDIA_BOX);
    page.art_box = read_box(bytes, ART_BOX);
    page.bleed_box = read_box(bytes, BLEED_BOX);
    page.trim_box = read_box(bytes, TRIM_BOX);
    page
}

/// Read a `[x0 y0 x1 y1]` array following `name`.
fn read_box(bytes: &[u8], name: &[u8]) -> Option<Rect> {
    let end = locate(bytes, 0, name)?;
    let open = locate(bytes, end + 1, &[OPEN_SQUARE])?;
    if bytes[end + 1..open].iter().any(|&b| !keywords::is_whitespace(b)) {
        // indirect reference instead of an inline array
        return None;
    }

    let value = match read_value(bytes, open + 1, CLOSE_SQUARE) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Unterminated box array: {}", e);
            return None;
        }
    };

    let coords: Vec<f32> = value
        .split_ascii_whitespace()
        .map(str::parse::<f32>)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match coords[..] {
        [x0, y0, x1, y1] => Some(Rect::new(x0, y0, x1, y1)),
        _ => None,
    }
}
