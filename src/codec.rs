//! Compression primitive used for stream payloads.
//!
//! The scanner never implements deflate itself; it goes through
//! [`StreamCodec`] so the redaction path and the extraction path share one
//! implementation, backed by `flate2` zlib streams.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// A reversible stream filter.
pub trait StreamCodec {
    /// Decompress a complete payload.
    fn inflate(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Compress a complete payload.
    fn deflate(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// FlateDecode (zlib) codec.
#[derive(Debug, Clone, Copy)]
pub struct FlateCodec {
    level: Compression,
}

impl FlateCodec {
    /// Create a codec with the default compression level.
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Create a codec that favours output size over speed.
    pub fn best() -> Self {
        Self {
            level: Compression::best(),
        }
    }
}

impl Default for FlateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCodec for FlateCodec {
    fn inflate(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(input);
        let mut output = Vec::new();
        decoder
            .read_to_end(&mut output)
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(output)
    }

    fn deflate(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(input.len() / 2), self.level);
        encoder.write_all(input)?;
        Ok(encoder.finish()?)
    }
}

/// Check whether `data` starts with a zlib header using the deflate method.
///
/// Accepts any window size (`0x48`, `0x78`, ...) as long as the header
/// checksum holds.
pub fn has_zlib_signature(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => {
            (cmf & 0x0F) == 8 && (cmf >> 4) <= 7 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0
        }
        _ => false,
    }
}
