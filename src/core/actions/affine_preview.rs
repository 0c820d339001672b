//! Instant approximations of a new view from the last rendered frame.
//!
//! A point drawn at source pixel `s` lands at `s * scale + translate` on the
//! target canvas. The mapping is exact for plane coordinates, so the preview
//! only loses detail to resampling.

use rayon::prelude::*;

use crate::core::data::fractal_params::{FractalParameters, ViewAnchor};
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::util::coords::plane_units_per_pixel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl PreviewTransform {
    /// Transform taking a frame rendered at `anchor` on a
    /// `source_width x source_height` canvas to the view described by `params`
    /// on a `target_width x target_height` canvas.
    #[must_use]
    pub fn between(
        source_width: u32,
        source_height: u32,
        anchor: ViewAnchor,
        target_width: u32,
        target_height: u32,
        params: &FractalParameters,
    ) -> Self {
        let zoom_ratio = params.zoom() / anchor.zoom;
        let base_scale = target_height as f64 / source_height as f64;
        let scale = base_scale * zoom_ratio;

        let offset_x = (target_width as f64 - source_width as f64 * scale) / 2.0;
        let offset_y = (target_height as f64 - source_height as f64 * scale) / 2.0;

        let units = plane_units_per_pixel(target_height, params.zoom());
        let shift = params.center() - anchor.center;

        Self {
            scale,
            translate_x: offset_x - shift.real / units,
            translate_y: offset_y - shift.imag / units,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate_x == 0.0 && self.translate_y == 0.0
    }

    /// Where the target position `(x, y)` came from in the source frame.
    #[must_use]
    pub fn source_position(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.translate_x) / self.scale, (y - self.translate_y) / self.scale)
    }

    #[must_use]
    pub fn target_position(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.translate_x, y * self.scale + self.translate_y)
    }
}

/// Nearest-neighbour resample of `source` through `transform`.
///
/// Target pixels whose centre maps outside the source stay transparent.
#[must_use]
pub fn resample(source: &PixelBuffer, target_width: u32, target_height: u32, transform: &PreviewTransform) -> PixelBuffer {
    let mut target = PixelBuffer::new(target_width, target_height);

    if target_width == 0 || target_height == 0 || source.width() == 0 || source.height() == 0 {
        return target;
    }

    if !(transform.scale.is_finite() && transform.scale > 0.0) {
        return target;
    }

    let stride = target.row_stride();
    let source_width = source.width() as f64;
    let source_height = source.height() as f64;
    let source_stride = source.row_stride();
    let source_data = source.buffer();

    target
        .buffer_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let (sx, sy) = transform.source_position(x as f64 + 0.5, y as f64 + 0.5);

                if !(sx >= 0.0 && sy >= 0.0 && sx < source_width && sy < source_height) {
                    continue;
                }

                let offset = sy as usize * source_stride + sx as usize * BYTES_PER_PIXEL;
                pixel.copy_from_slice(&source_data[offset..offset + BYTES_PER_PIXEL]);
            }
        });

    target
}
