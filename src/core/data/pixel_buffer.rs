use crate::core::data::colour::Colour;
use crate::core::data::render_chunk::RenderChunk;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 4;

fn buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    ChunkOutsideBounds {
        chunk: RenderChunk,
        width: u32,
        height: u32,
    },
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutsideBounds { x, y, width, height } => {
                write!(f, "pixel at x:{}, y:{} outside of {}x{} buffer", x, y, width, height)
            }
            Self::ChunkOutsideBounds { chunk, width, height } => {
                write!(
                    f,
                    "chunk at x:{}, y:{} ({}x{}) outside of {}x{} buffer",
                    chunk.start_x(),
                    chunk.start_y(),
                    chunk.width(),
                    chunk.height(),
                    width,
                    height
                )
            }
            Self::BoundsMismatch {
                expected_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "expected buffer size {} does not match buffer size {}",
                    expected_size, buffer_size
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA image, four bytes per pixel.
///
/// A freshly created buffer is fully transparent, which is also what the
/// preview transform leaves behind outside the resampled image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; buffer_size(width, height)],
        }
    }

    pub fn from_data(width: u32, height: u32, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let expected_size = buffer_size(width, height);

        if expected_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { width, height, buffer })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    #[must_use]
    pub fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.buffer[index..index + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        if x >= self.width || y >= self.height {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.buffer[index..index + BYTES_PER_PIXEL].copy_from_slice(&colour.to_rgba());

        Ok(())
    }

    /// Copies a chunk-sized RGBA block into this buffer at the chunk's offset.
    pub fn blit(&mut self, chunk: RenderChunk, rgba: &[u8]) -> Result<(), PixelBufferError> {
        if !chunk.fits_within(self.width, self.height) {
            return Err(PixelBufferError::ChunkOutsideBounds {
                chunk,
                width: self.width,
                height: self.height,
            });
        }

        let expected_size = chunk.size() * BYTES_PER_PIXEL;
        if rgba.len() != expected_size {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: rgba.len(),
            });
        }

        let chunk_stride = chunk.width() as usize * BYTES_PER_PIXEL;
        let stride = self.row_stride();

        for (row, source) in rgba.chunks_exact(chunk_stride).enumerate() {
            let offset = (chunk.start_y() as usize + row) * stride
                + chunk.start_x() as usize * BYTES_PER_PIXEL;
            self.buffer[offset..offset + chunk_stride].copy_from_slice(source);
        }

        Ok(())
    }
}
