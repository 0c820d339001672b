use crate::core::fractals::mandelbrot::algorithm;
use serde::{Deserialize, Serialize};

/// Per-pixel escape-time function: `(real, imag, max_iterations) -> count`.
pub type EscapeTimeKernel = fn(f64, f64, u32) -> u32;

/// Selects which escape-time kernel a render runs. Everything else in the
/// pipeline is kernel-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FractalKind {
    #[default]
    Mandelbrot,
}

impl FractalKind {
    pub const ALL: &'static [Self] = &[Self::Mandelbrot];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
        }
    }

    #[must_use]
    pub fn kernel(self) -> EscapeTimeKernel {
        match self {
            Self::Mandelbrot => algorithm::iterate,
        }
    }
}

impl std::fmt::Display for FractalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
