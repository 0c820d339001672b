use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderChunkError {
    InvalidSize { width: u32, height: u32 },
    OutOfRange { start_x: u32, start_y: u32, width: u32, height: u32 },
}

impl fmt::Display for RenderChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "render chunk size must be positive: {}x{}", width, height)
            }
            Self::OutOfRange {
                start_x,
                start_y,
                width,
                height,
            } => write!(
                f,
                "render chunk {}x{} at ({}, {}) extends past the coordinate range",
                width, height, start_x, start_y
            ),
        }
    }
}

impl Error for RenderChunkError {}

/// An axis-aligned rectangle of canvas pixels, the unit of parallel work.
///
/// Chunks are always non-empty and expressed in canvas coordinates with the
/// origin at the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawChunk")]
pub struct RenderChunk {
    start_x: u32,
    start_y: u32,
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChunk {
    start_x: u32,
    start_y: u32,
    width: u32,
    height: u32,
}

impl TryFrom<RawChunk> for RenderChunk {
    type Error = RenderChunkError;

    fn try_from(raw: RawChunk) -> Result<Self, Self::Error> {
        Self::new(raw.start_x, raw.start_y, raw.width, raw.height)
    }
}

impl RenderChunk {
    pub fn new(start_x: u32, start_y: u32, width: u32, height: u32) -> Result<Self, RenderChunkError> {
        if width == 0 || height == 0 {
            return Err(RenderChunkError::InvalidSize { width, height });
        }

        if start_x.checked_add(width).is_none() || start_y.checked_add(height).is_none() {
            return Err(RenderChunkError::OutOfRange {
                start_x,
                start_y,
                width,
                height,
            });
        }

        Ok(Self {
            start_x,
            start_y,
            width,
            height,
        })
    }

    #[must_use]
    pub fn start_x(&self) -> u32 {
        self.start_x
    }

    #[must_use]
    pub fn start_y(&self) -> u32 {
        self.start_y
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn end_x(&self) -> u32 {
        self.start_x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn end_y(&self) -> u32 {
        self.start_y + self.height
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        self.start_x <= x && x < self.end_x() && self.start_y <= y && y < self.end_y()
    }

    #[must_use]
    pub fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.end_x() <= canvas_width && self.end_y() <= canvas_height
    }

}
