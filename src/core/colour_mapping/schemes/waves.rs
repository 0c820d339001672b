//! Periodic schemes built from phase-shifted sine waves.

use std::f64::consts::PI;

use crate::core::colour_mapping::hsl::hsl_to_rgb;
use crate::core::data::colour::Colour;

use super::{IN_SET, log_ratio, ratio};

pub fn electric_plasma(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let phase = ratio(iterations, max_iterations) * PI * 2.0;
    Colour::from_f64(
        phase.sin() * 127.0 + 128.0,
        (phase + PI / 2.0).sin() * 127.0 + 128.0,
        (phase + PI).sin() * 127.0 + 128.0,
    )
}

pub fn neon_nights(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let phase = ratio(iterations, max_iterations) * 6.28;
    Colour::from_f64(
        phase.sin() * 127.0 + 128.0,
        (phase + 2.09).sin() * 127.0 + 128.0,
        (phase + 4.18).sin() * 127.0 + 128.0,
    )
}

pub fn celestial_nebula(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let v = 5.0 * log_ratio(iterations, max_iterations);
    Colour::from_f64(
        ((v * 0.6).sin() * 0.5 + 0.5) * 255.0,
        ((v * 0.8 + 2.0).sin() * 0.5 + 0.5) * 255.0,
        ((v * 0.9 + 4.0).sin() * 0.5 + 0.5) * 255.0,
    )
}

pub fn galactic_core(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let v = log_ratio(iterations, max_iterations);
    let angle = v * PI * 20.0;

    Colour::from_f64(
        (0.5 + 0.5 * angle.cos()) * 255.0,
        (0.5 + 0.5 * (angle + v * 5.0).sin()) * 200.0,
        (0.5 + 0.5 * (angle * 3.0).cos()) * 255.0,
    )
}

pub fn fractal_iridescence(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let phase = ratio(iterations, max_iterations) * 20.0;
    Colour::from_f64(
        phase.sin() * (phase * 1.3).sin() * 127.0 + 128.0,
        (phase + 2.0).sin() * (phase * 0.8).sin() * 127.0 + 128.0,
        (phase + 4.0).sin() * (phase * 1.5).sin() * 127.0 + 128.0,
    )
}

pub fn quantum_fluctuations(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let n = ratio(iterations, max_iterations);

    hsl_to_rgb(n * 360.0 * phi, 0.8, 0.5 * (n * PI * 8.0).sin() + 0.5)
}

pub fn deep_sea_bioluminescence(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return Colour::new(0, 0, 15);
    }

    let t = ratio(iterations, max_iterations);
    let phase = t * PI * 2.0;

    let base = Colour::from_f64(
        (phase * 5.0).sin().powi(2) * 100.0,
        20.0 + (phase * 7.0).sin().powi(4) * 200.0,
        50.0 + t * 100.0,
    );

    if (phase * 13.0).sin() > 0.97 {
        base.brighten(100, 150, 50)
    } else {
        base
    }
}

pub fn prismatic_refraction(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    const FREQUENCY: f64 = 10.0;
    let phase = ratio(iterations, max_iterations);
    let angle = phase * PI * 2.0 * FREQUENCY;
    let colour = hsl_to_rgb(angle.to_degrees(), 1.0, 0.5);

    let highlight = (phase * PI * 2.0 * FREQUENCY * 3.0).sin();
    if highlight > 0.9 {
        let boost = ((1.0 - phase) * 200.0).round() as u8;
        colour.brighten(boost, boost, boost)
    } else {
        colour
    }
}

pub fn midnight_oasis(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    let mut colour = Colour::from_f64(20.0 + t * 40.0, 20.0 + t * 60.0, 50.0 + t * 100.0);

    let stars = (t * 100.0).sin() * (t * 50.0).sin() * (t * 25.0).sin();
    if stars > 0.9 {
        colour = colour.brighten(200, 200, 150);
    }

    let water = (t * 20.0).sin() * (t * 10.0).cos();
    if water > 0.8 {
        colour = Colour::from_f64(colour.r as f64 * 0.5, colour.g as f64, colour.b as f64).brighten(0, 100, 50);
    }

    colour
}
