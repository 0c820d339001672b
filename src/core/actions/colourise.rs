use rayon::prelude::*;

use crate::core::colour_mapping::map::ColourScheme;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// Writes one opaque RGBA pixel per escape count into `out`.
///
/// `out` must hold exactly `values.len() * 4` bytes.
pub fn colourise_into(values: &[u32], max_iterations: u32, scheme: &dyn ColourScheme, out: &mut [u8]) {
    debug_assert_eq!(out.len(), values.len() * BYTES_PER_PIXEL);

    for (&value, pixel) in values.iter().zip(out.chunks_exact_mut(BYTES_PER_PIXEL)) {
        pixel.copy_from_slice(&scheme.colour(value, max_iterations).to_rgba());
    }
}

/// RGBA bytes for a single chunk's counts.
#[must_use]
pub fn colourise_chunk(values: &[u32], max_iterations: u32, scheme: &dyn ColourScheme) -> Vec<u8> {
    let mut rgba = vec![0; values.len() * BYTES_PER_PIXEL];
    colourise_into(values, max_iterations, scheme, &mut rgba);
    rgba
}

/// Colours a whole iteration buffer, one rayon task per row.
#[must_use]
pub fn colourise_buffer(iterations: &IterationBuffer, scheme: &dyn ColourScheme) -> PixelBuffer {
    let mut image = PixelBuffer::new(iterations.width(), iterations.height());
    let row_width = iterations.width() as usize;

    if row_width == 0 {
        return image;
    }

    let stride = image.row_stride();
    let max_iterations = iterations.max_iterations();

    image
        .buffer_mut()
        .par_chunks_mut(stride)
        .zip(iterations.data().par_chunks(row_width))
        .for_each(|(out, values)| colourise_into(values, max_iterations, scheme, out));

    image
}
