use crate::core::data::fractal_params::{FractalParameters, ViewAnchor};
use crate::core::data::render_chunk::RenderChunk;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IterationBufferError {
    ChunkOutsideBounds { chunk: RenderChunk, width: u32, height: u32 },
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for IterationBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkOutsideBounds { chunk, width, height } => write!(
                f,
                "chunk at x:{}, y:{} ({}x{}) outside of {}x{} canvas",
                chunk.start_x(),
                chunk.start_y(),
                chunk.width(),
                chunk.height(),
                width,
                height
            ),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "chunk data has {} values, expected {}", actual, expected)
            }
        }
    }
}

impl Error for IterationBufferError {}

/// Escape counts for a whole canvas, row-major, one `u32` per pixel.
///
/// Remembers the iteration cap and view it was computed for so it can be
/// recoloured later without consulting the (possibly changed) parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    width: u32,
    height: u32,
    max_iterations: u32,
    anchor: ViewAnchor,
    data: Vec<u32>,
}

impl IterationBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32, params: &FractalParameters) -> Self {
        Self {
            width,
            height,
            max_iterations: params.max_iterations(),
            anchor: params.anchor(),
            data: vec![0; width as usize * height as usize],
        }
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
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn anchor(&self) -> ViewAnchor {
        self.anchor
    }

    #[must_use]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Writes a chunk's row-major counts at the chunk's offset.
    pub fn store_chunk(&mut self, chunk: RenderChunk, values: &[u32]) -> Result<(), IterationBufferError> {
        if !chunk.fits_within(self.width, self.height) {
            return Err(IterationBufferError::ChunkOutsideBounds {
                chunk,
                width: self.width,
                height: self.height,
            });
        }

        if values.len() != chunk.size() {
            return Err(IterationBufferError::LengthMismatch {
                expected: chunk.size(),
                actual: values.len(),
            });
        }

        let row_width = chunk.width() as usize;
        let canvas_width = self.width as usize;

        for (row, source) in values.chunks_exact(row_width).enumerate() {
            let offset = (chunk.start_y() as usize + row) * canvas_width + chunk.start_x() as usize;
            self.data[offset..offset + row_width].copy_from_slice(source);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_chunk_writes_at_offset() {
        let mut buffer = IterationBuffer::new(5, 4, &FractalParameters::default());
        let chunk = RenderChunk::new(1, 1, 3, 2).unwrap();

        buffer.store_chunk(chunk, &[1, 2, 3, 4, 5, 6]).unwrap();

        assert_eq!(buffer.get(1, 1), Some(1));
        assert_eq!(buffer.get(3, 1), Some(3));
        assert_eq!(buffer.get(1, 2), Some(4));
        assert_eq!(buffer.get(3, 2), Some(6));
        assert_eq!(buffer.get(0, 1), Some(0));
        assert_eq!(buffer.get(4, 2), Some(0));
        assert_eq!(buffer.get(5, 0), None);
    }

    #[test]
    fn test_store_chunk_rejects_wrong_length() {
        let mut buffer = IterationBuffer::new(5, 4, &FractalParameters::default());
        let chunk = RenderChunk::new(0, 0, 2, 2).unwrap();

        assert_eq!(
            buffer.store_chunk(chunk, &[1, 2, 3]),
            Err(IterationBufferError::LengthMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_store_chunk_rejects_chunk_outside_canvas() {
        let mut buffer = IterationBuffer::new(5, 4, &FractalParameters::default());
        let chunk = RenderChunk::new(4, 0, 2, 2).unwrap();

        assert!(matches!(
            buffer.store_chunk(chunk, &[0; 4]),
            Err(IterationBufferError::ChunkOutsideBounds { .. })
        ));
    }

    #[test]
    fn test_remembers_max_iterations_and_view() {
        let params = FractalParameters::default();
        let buffer = IterationBuffer::new(2, 2, &params);

        assert_eq!(buffer.max_iterations(), params.max_iterations());
        assert_eq!(buffer.anchor(), params.anchor());
    }
}
