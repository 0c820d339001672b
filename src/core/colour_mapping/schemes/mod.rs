//! Built-in colour schemes, registered by display name.

mod gradients;
mod patterns;
mod waves;

use crate::core::data::colour::Colour;

pub use gradients::*;
pub use patterns::*;
pub use waves::*;

pub type SchemeFn = fn(u32, u32) -> Colour;

/// Colour for points that never escaped.
pub const IN_SET: Colour = Colour::BLACK;

pub const DEFAULT_SCHEME: &str = "Fire Palette";

/// Every built-in scheme in listing order. The first entry is the default.
pub const BUILTIN: &[(&str, SchemeFn)] = &[
    (DEFAULT_SCHEME, fire_palette),
    ("Hyperbolic Tessellation", hyperbolic_tessellation),
    ("Monochrome Gradient", monochrome_gradient),
    ("Classic Blue/Yellow", classic_blue_yellow),
    ("Electric Plasma", electric_plasma),
    ("Ocean Depths", ocean_depths),
    ("Psychedelic Swirl", psychedelic_swirl),
    ("Neon Nights", neon_nights),
    ("Pastel Dream", pastel_dream),
    ("Cosmic Dust", cosmic_dust),
    ("Primary Contrast", primary_contrast),
    ("Twilight Gradient", twilight_gradient),
    ("Emerald City", emerald_city),
    ("Sunset Glow", sunset_glow),
    ("Celestial Nebula", celestial_nebula),
    ("Aurora Borealis", aurora_borealis),
    ("Quantum Fluctuations", quantum_fluctuations),
    ("Deep Sea Bioluminescence", deep_sea_bioluminescence),
    ("Galactic Core", galactic_core),
    ("Bismuth Crystal", bismuth_crystal),
    ("Volcanic Inferno", volcanic_inferno),
    ("Prismatic Refraction", prismatic_refraction),
    ("Midnight Oasis", midnight_oasis),
    ("Fractal Iridescence", fractal_iridescence),
    ("Quantum Entanglement", quantum_entanglement),
    ("Frozen Crystalline", frozen_crystalline),
    ("Abyssal Gradient", abyssal_gradient),
    ("Mandelbrot Illuminated", mandelbrot_illuminated),
];

#[inline]
fn ratio(iterations: u32, max_iterations: u32) -> f64 {
    iterations as f64 / max_iterations as f64
}

/// `ln(iterations) / ln(max_iterations)`, zero where either log is undefined.
fn log_ratio(iterations: u32, max_iterations: u32) -> f64 {
    if iterations == 0 || max_iterations <= 1 {
        return 0.0;
    }

    (iterations as f64).ln() / (max_iterations as f64).ln()
}

/// Continuous escape estimate from the count alone. Counts below two have no
/// defined `ln(ln(n))` and are returned unchanged.
fn smoothed_count(iterations: u32) -> f64 {
    let n = iterations as f64;
    if iterations < 2 {
        return n;
    }

    n + 1.0 - n.ln().ln() / std::f64::consts::LN_2
}
