use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished frame somewhere on disk.
pub trait FilePresenterPort {
    fn present(&self, frame: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
