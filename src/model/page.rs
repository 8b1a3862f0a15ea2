//! Page-level types.

use serde::{Deserialize, Serialize};

use super::ByteRange;

/// Rectangle in default user space (`[x0 y0 x1 y1]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in points (1 point = 1/72 inch)
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    /// Height in points
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }
}

/// A page object and its boundary boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Object number of the page dictionary
    pub id: u32,

    /// Byte range of the page object in the document buffer
    pub range: ByteRange,

    pub media_box: Option<Rect>,
    pub art_box: Option<Rect>,
    pub bleed_box: Option<Rect>,
    pub trim_box: Option<Rect>,
}

impl Page {
    /// Create a page without any boxes.
    pub fn new(id: u32, range: ByteRange) -> Self {
        Self {
            id,
            range,
            media_box: None,
            art_box: None,
            bleed_box: None,
            trim_box: None,
        }
    }

    /// Page size from the media box, if declared.
    pub fn size(&self) -> Option<(f32, f32)> {
        self.media_box.map(|r| (r.width(), r.height()))
    }
}
