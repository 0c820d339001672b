pub mod colour;
pub mod complex;
pub mod fractal_params;
pub mod iteration_buffer;
pub mod pixel_buffer;
pub mod render_chunk;
