use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_chunk::RenderChunk;

/// A paintable canvas owned by the UI layer.
///
/// Painting is best effort: a surface that has gone away, or shrunk below a
/// region, silently ignores the write.
pub trait RenderSurface: Send + Sync {
    /// Current `(width, height)`, or `None` when there is nothing to paint on.
    fn size(&self) -> Option<(u32, u32)>;

    /// Paints `rgba` (row-major, four bytes per pixel) over `chunk`.
    fn put_region(&self, chunk: RenderChunk, rgba: &[u8]);

    /// Replaces the whole canvas with `frame`.
    fn put_frame(&self, frame: &PixelBuffer);
}
