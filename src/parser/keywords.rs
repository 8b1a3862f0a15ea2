//! Fixed lexical constants of the document format.

/// Trailer section keyword.
pub const TRAILER: &[u8] = b"trailer";
/// Declared object count inside the trailer.
pub const SIZE: &[u8] = b"/Size";
/// Object type attribute.
pub const TYPE: &[u8] = b"/Type";
/// Object opening keyword (`<id> 0 obj`).
pub const OBJECT: &str = "obj";
/// Object closing keyword.
pub const END_OBJECT: &[u8] = b"endobj";
/// Header prefix carrying the format version.
pub const VERSION: &[u8] = b"%PDF-";

/// Compression filter marker.
pub const FLATE_DECODE: &[u8] = b"Filter/FlateDecode";
/// Declared stream length attribute.
pub const STREAM_LENGTH: &[u8] = b"/Length";
/// Stream payload opening keyword.
pub const STREAM: &[u8] = b"stream";
/// Stream payload closing keyword.
pub const END_STREAM: &[u8] = b"endstream";

/// Text-drawing scope start.
pub const BEGIN_TEXT: &[u8] = b"BT";
/// Text-drawing scope end.
pub const END_TEXT: &[u8] = b"ET";
/// Font directive operator.
pub const TEXT_FONT: &[u8] = b"Tf";
/// Plain text draw operator.
pub const TEXT_PLAIN: &[u8] = b"Tj";
/// Kerned text array draw operator.
pub const TEXT_KERNED: &[u8] = b"TJ";

pub const MEDIA_BOX: &[u8] = b"/MediaBox";
pub const ART_BOX: &[u8] = b"/ArtBox";
pub const BLEED_BOX: &[u8] = b"/BleedBox";
pub const TRIM_BOX: &[u8] = b"/TrimBox";

pub const SPACE: u8 = b' ';
pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const PERCENT: u8 = b'%';
pub const SOLIDUS: u8 = b'/';
pub const OPEN_PAREN: u8 = b'(';
pub const CLOSE_PAREN: u8 = b')';
pub const OPEN_ANGLE: u8 = b'<';
pub const CLOSE_ANGLE: u8 = b'>';
pub const OPEN_SQUARE: u8 = b'[';
pub const CLOSE_SQUARE: u8 = b']';
pub const OPEN_CURLY: u8 = b'{';
pub const CLOSE_CURLY: u8 = b'}';

/// Whitespace bytes, NUL included.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\0' | b'\t' | LINE_FEED | 0x0C | CARRIAGE_RETURN | SPACE)
}

/// Structural punctuation that terminates a token.
pub fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        OPEN_PAREN
            | CLOSE_PAREN
            | OPEN_ANGLE
            | CLOSE_ANGLE
            | OPEN_SQUARE
            | CLOSE_SQUARE
            | OPEN_CURLY
            | CLOSE_CURLY
            | SOLIDUS
            | PERCENT
    )
}

/// Line terminator (LF or CR).
pub fn is_line_end(b: u8) -> bool {
    b == LINE_FEED || b == CARRIAGE_RETURN
}
