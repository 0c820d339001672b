use crate::core::data::complex::Complex;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

pub const MIN_ZOOM: f64 = 1.0;
const DEFAULT_MAX_ITERATIONS: u32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametersError {
    ZeroMaxIterations,
}

impl fmt::Display for ParametersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterations => write!(f, "Maximum iterations must be greater than zero"),
        }
    }
}

impl Error for ParametersError {}

/// The view a render pass computes: iteration cap, zoom and plane centre.
///
/// Values are snapshotted by copy into every chunk task, so a pass never
/// observes later changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawParameters")]
pub struct FractalParameters {
    max_iterations: u32,
    zoom: f64,
    center: Complex,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameters {
    max_iterations: u32,
    zoom: f64,
    center: Complex,
}

impl TryFrom<RawParameters> for FractalParameters {
    type Error = ParametersError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.max_iterations, raw.zoom, raw.center)
    }
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            zoom: MIN_ZOOM,
            center: Complex::new(-1.0, 0.0),
        }
    }
}

impl FractalParameters {
    /// Zoom below [`MIN_ZOOM`] (or NaN) is clamped rather than rejected.
    pub fn new(max_iterations: u32, zoom: f64, center: Complex) -> Result<Self, ParametersError> {
        if max_iterations == 0 {
            return Err(ParametersError::ZeroMaxIterations);
        }

        Ok(Self {
            max_iterations,
            zoom: clamp_zoom(zoom),
            center,
        })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn anchor(&self) -> ViewAnchor {
        ViewAnchor {
            center: self.center,
            zoom: self.zoom,
        }
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), ParametersError> {
        if max_iterations == 0 {
            return Err(ParametersError::ZeroMaxIterations);
        }

        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn set_center(&mut self, center: Complex) {
        self.center = center;
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() { MIN_ZOOM } else { zoom.max(MIN_ZOOM) }
}

/// The `(center, zoom)` a cached image was rendered at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAnchor {
    pub center: Complex,
    pub zoom: f64,
}
