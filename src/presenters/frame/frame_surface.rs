use std::sync::{Mutex, MutexGuard, PoisonError};

use log::trace;

use crate::controllers::interactive::ports::surface::RenderSurface;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_chunk::RenderChunk;

/// In-memory [`RenderSurface`] holding one RGBA frame.
///
/// Stands in for a real canvas in the CLI and in tests.
#[derive(Debug)]
pub struct FrameSurface {
    frame: Mutex<PixelBuffer>,
}

impl FrameSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Mutex::new(PixelBuffer::new(width, height)),
        }
    }

    /// Discards the contents and starts over with a transparent frame.
    pub fn resize(&self, width: u32, height: u32) {
        *self.lock() = PixelBuffer::new(width, height);
    }

    #[must_use]
    pub fn snapshot(&self) -> PixelBuffer {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PixelBuffer> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RenderSurface for FrameSurface {
    fn size(&self) -> Option<(u32, u32)> {
        let frame = self.lock();
        Some((frame.width(), frame.height()))
    }

    fn put_region(&self, chunk: RenderChunk, rgba: &[u8]) {
        if let Err(err) = self.lock().blit(chunk, rgba) {
            trace!("ignoring region outside the surface: {}", err);
        }
    }

    fn put_frame(&self, frame: &PixelBuffer) {
        *self.lock() = frame.clone();
    }
}
