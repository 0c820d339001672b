//! Banded and stepped schemes that depend on the raw count, not just the
//! escape ratio.

use std::f64::consts::PI;

use crate::core::colour_mapping::hsl::hsl_to_rgb;
use crate::core::data::colour::Colour;

use super::{IN_SET, log_ratio, ratio, smoothed_count};

pub fn psychedelic_swirl(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let angle = iterations as f64 * 0.1;
    hsl_to_rgb(angle.to_degrees(), 0.8, 0.5)
}

pub fn cosmic_dust(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    hsl_to_rgb(360.0 * log_ratio(iterations, max_iterations), 0.7, 0.5)
}

pub fn primary_contrast(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    match iterations % 4 {
        0 => Colour::WHITE,
        1 => Colour::new(255, 0, 0),
        2 => Colour::new(0, 0, 255),
        _ => Colour::new(0, 255, 0),
    }
}

pub fn aurora_borealis(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = smoothed_count(iterations) / max_iterations as f64;

    if t < 0.5 {
        // green to blue
        hsl_to_rgb(120.0 - t * 2.0 * 60.0, 0.8, 0.2 + t * 0.4)
    } else {
        // blue to purple
        hsl_to_rgb(240.0 - (t - 0.5) * 2.0 * 60.0, 0.8, 0.4 - (t - 0.5) * 0.2)
    }
}

pub fn bismuth_crystal(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    let stepped = (t * 12.0).floor() / 12.0;

    hsl_to_rgb(stepped * 360.0, 0.7, 0.4 + (t * PI * 2.0).sin() * 0.2)
}

pub fn quantum_entanglement(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    let base_hue = (t * 360.0) % 360.0;
    let complementary = ((t * 10.0).floor() as u64) % 2 == 1;
    let hue = if complementary { (base_hue + 180.0) % 360.0 } else { base_hue };

    hsl_to_rgb(hue, 0.9, 0.5)
}

const TESSELLATION_HUES: [f64; 6] = [330.0, 270.0, 210.0, 150.0, 90.0, 30.0];

pub fn hyperbolic_tessellation(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let pattern = (iterations % 16) as f64 / 16.0;
    let section = (iterations / 16) as usize % TESSELLATION_HUES.len();

    hsl_to_rgb(TESSELLATION_HUES[section], 0.7 + pattern * 0.3, 0.3 + pattern * 0.4)
}

pub fn mandelbrot_illuminated(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = smoothed_count(iterations) / max_iterations as f64;
    let hue = (t * 360.0 + 120.0) % 360.0;

    let escape_rate = (iterations as f64 + 1.0).ln() / (max_iterations as f64).ln();
    let lighting = escape_rate.sqrt();
    let base = hsl_to_rgb(hue, 0.9, 0.1 + lighting * 0.6);

    let edge = (t * PI * 20.0).sin().powi(20);
    if edge <= 0.5 {
        return base;
    }

    let intensity = (edge - 0.5) * 2.0;
    let lift = |channel: u8| channel as f64 + (intensity * (255.0 - channel as f64)).round();
    Colour::from_f64(lift(base.r), lift(base.g), lift(base.b))
}
