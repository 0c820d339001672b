//! Escape-time iteration of `z <- z^2 + c` starting from `z = 0`.
//!
//! `zr` and `zi` are tracked as separate reals; the hot loop allocates
//! nothing and never builds a `Complex`.

pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Final state of one orbit: the escape count plus the last `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTime {
    pub iterations: u32,
    pub zr: f64,
    pub zi: f64,
}

/// Returns the iteration at which `|z|^2 >= 4`, or `max_iterations` if the
/// orbit stays bounded that long.
#[inline]
#[must_use]
pub fn iterate(real: f64, imag: f64, max_iterations: u32) -> u32 {
    iterate_orbit(real, imag, max_iterations).iterations
}

#[inline]
#[must_use]
pub fn iterate_orbit(real: f64, imag: f64, max_iterations: u32) -> EscapeTime {
    let mut zr = 0.0;
    let mut zi = 0.0;
    let mut iterations = 0;

    while zr * zr + zi * zi < ESCAPE_RADIUS_SQUARED && iterations < max_iterations {
        let next_zr = zr * zr - zi * zi + real;
        zi = 2.0 * zr * zi + imag;
        zr = next_zr;
        iterations += 1;
    }

    EscapeTime { iterations, zr, zi }
}
