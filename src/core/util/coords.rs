//! Conversions between canvas pixels and the complex plane.
//!
//! The visible imaginary span is always `4 / zoom`, spread over the canvas
//! height; the real span follows from the aspect ratio. Callers must not pass
//! a zero canvas height.

use crate::core::data::complex::Complex;

pub const PLANE_SPAN: f64 = 4.0;

/// Plane units covered by one pixel at the given canvas height and zoom.
#[must_use]
pub fn plane_units_per_pixel(canvas_height: u32, zoom: f64) -> f64 {
    (PLANE_SPAN / zoom) / canvas_height as f64
}

#[must_use]
pub fn pixel_to_plane(
    x: f64,
    y: f64,
    canvas_width: u32,
    canvas_height: u32,
    center: Complex,
    zoom: f64,
) -> Complex {
    let scale = PLANE_SPAN / zoom;
    let width = canvas_width as f64;
    let height = canvas_height as f64;

    Complex {
        real: center.real + ((x - width / 2.0) * scale) / height,
        imag: center.imag + ((y - height / 2.0) * scale) / height,
    }
}

#[must_use]
pub fn plane_to_pixel(
    point: Complex,
    canvas_width: u32,
    canvas_height: u32,
    center: Complex,
    zoom: f64,
) -> (f64, f64) {
    let scale = PLANE_SPAN / zoom;
    let width = canvas_width as f64;
    let height = canvas_height as f64;

    (
        ((point.real - center.real) * height) / scale + width / 2.0,
        ((point.imag - center.imag) * height) / scale + height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_canvas_centre_maps_to_view_centre() {
        let center = Complex::new(-0.75, 0.1);
        let point = pixel_to_plane(400.0, 300.0, 800, 600, center, 3.0);

        assert_eq!(point, center);
    }

    #[test]
    fn test_vertical_span_is_four_over_zoom() {
        let center = Complex::default();
        let top = pixel_to_plane(50.0, 0.0, 100, 100, center, 2.0);
        let bottom = pixel_to_plane(50.0, 100.0, 100, 100, center, 2.0);

        assert!((bottom.imag - top.imag - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_horizontal_span_follows_aspect_ratio() {
        let center = Complex::default();
        let left = pixel_to_plane(0.0, 50.0, 200, 100, center, 1.0);
        let right = pixel_to_plane(200.0, 50.0, 200, 100, center, 1.0);

        assert!((right.real - left.real - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_round_trip_recovers_pixel() {
        let centers = [
            Complex::new(-1.0, 0.0),
            Complex::new(0.3, -0.02),
            Complex::new(-1.7499, 0.0001),
        ];
        let zooms = [1.0, 2.5, 1000.0, 1.0e6];
        let sizes = [(1, 1), (100, 100), (1920, 1080), (37, 401)];

        for &center in &centers {
            for &zoom in &zooms {
                for &(w, h) in &sizes {
                    for &(px, py) in &[(0.0, 0.0), (w as f64 / 3.0, h as f64 - 1.0), (17.5, 3.25)] {
                        let plane = pixel_to_plane(px, py, w, h, center, zoom);
                        let (x, y) = plane_to_pixel(plane, w, h, center, zoom);

                        assert!((x - px).abs() < EPSILON, "x {} != {} for {:?}", x, px, (w, h, zoom));
                        assert!((y - py).abs() < EPSILON, "y {} != {} for {:?}", y, py, (w, h, zoom));
                    }
                }
            }
        }
    }

    #[test]
    fn test_plane_units_per_pixel() {
        assert!((plane_units_per_pixel(100, 1.0) - 0.04).abs() < EPSILON);
        assert!((plane_units_per_pixel(100, 4.0) - 0.01).abs() < EPSILON);
    }
}
