use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::render_chunk::RenderChunk;
use crate::core::fractals::fractal_kinds::EscapeTimeKernel;
use crate::core::util::coords::pixel_to_plane;

/// Runs `kernel` for every pixel of `chunk` and returns the escape counts
/// row-major, `chunk.width() * chunk.height()` long.
///
/// Pixel `(x, y)` is sampled at its top-left corner in canvas coordinates.
#[must_use]
pub fn compute_chunk(
    chunk: RenderChunk,
    canvas_width: u32,
    canvas_height: u32,
    params: &FractalParameters,
    kernel: EscapeTimeKernel,
) -> Vec<u32> {
    let max_iterations = params.max_iterations();
    let center = params.center();
    let zoom = params.zoom();

    let mut values = Vec::with_capacity(chunk.size());

    for y in chunk.start_y()..chunk.end_y() {
        for x in chunk.start_x()..chunk.end_x() {
            let c = pixel_to_plane(x as f64, y as f64, canvas_width, canvas_height, center, zoom);
            values.push(kernel(c.real, c.imag, max_iterations));
        }
    }

    values
}
