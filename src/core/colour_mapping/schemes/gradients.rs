//! Smooth ramps over the escape ratio `iterations / max_iterations`.

use crate::core::colour_mapping::hsl::hsl_to_rgb;
use crate::core::data::colour::Colour;

use super::{IN_SET, ratio};

pub fn fire_palette(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);

    // black -> red -> yellow -> white
    if t < 0.2 {
        Colour::from_f64(t * 5.0 * 255.0, 0.0, 0.0)
    } else if t < 0.5 {
        Colour::from_f64(255.0, (t - 0.2) * 3.33 * 255.0, 0.0)
    } else {
        Colour::from_f64(255.0, 255.0, (t - 0.5) * 2.0 * 255.0)
    }
}

pub fn monochrome_gradient(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let intensity = ratio(iterations, max_iterations) * 255.0;
    Colour::from_f64(intensity, intensity, intensity)
}

pub fn classic_blue_yellow(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    hsl_to_rgb(240.0 + ratio(iterations, max_iterations) * 60.0, 0.8, 0.5)
}

pub fn ocean_depths(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    Colour::from_f64(t * 30.0, 70.0 + t * 100.0, 100.0 + t * 155.0)
}

pub fn pastel_dream(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    hsl_to_rgb(ratio(iterations, max_iterations) * 360.0, 0.4, 0.8)
}

pub fn twilight_gradient(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    hsl_to_rgb(270.0 - t * 50.0, 0.8, 0.3 + t * 0.4)
}

pub fn emerald_city(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    Colour::from_f64(t * 100.0, 100.0 + t * 155.0, t * 100.0)
}

pub fn sunset_glow(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);

    if t < 0.3 {
        Colour::from_f64(128.0 + t * 3.33 * 127.0, 0.0, 128.0 * (1.0 - t * 3.33))
    } else if t < 0.6 {
        Colour::from_f64(255.0, (t - 0.3) * 3.33 * 165.0, 0.0)
    } else {
        Colour::from_f64(255.0, 165.0 + (t - 0.6) * 2.5 * 90.0, 0.0)
    }
}

pub fn volcanic_inferno(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);

    if t < 0.3 {
        Colour::from_f64(128.0 + t * 3.33 * 127.0, t * 3.33 * 80.0, t * 3.33 * 20.0)
    } else if t < 0.8 {
        let flicker = (t * 40.0).sin() * 0.1 + 0.9;
        Colour::from_f64(
            255.0 * flicker,
            (80.0 + (t - 0.3) * 2.0 * 175.0) * flicker,
            20.0 * flicker,
        )
    } else {
        Colour::from_f64(255.0, 255.0 - (1.0 - t) * 5.0 * 100.0, t * 100.0)
    }
}

pub fn frozen_crystalline(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    let t = ratio(iterations, max_iterations);
    let (r, g, b) = (200.0 + t * 55.0, 220.0 + t * 35.0, 255.0);
    let pattern = (t * 30.0).sin() * (t * 20.0).cos() * (t * 10.0).sin();

    if pattern > 0.7 {
        Colour::from_f64(r * 0.7, g * 0.8, b * 0.9)
    } else if pattern < -0.7 {
        Colour::WHITE
    } else {
        Colour::from_f64(r, g, b)
    }
}

pub fn abyssal_gradient(iterations: u32, max_iterations: u32) -> Colour {
    if iterations == max_iterations {
        return IN_SET;
    }

    // square root spreads detail into the darker end
    let t = ratio(iterations, max_iterations).sqrt();

    let base = if t < 0.5 {
        Colour::from_f64(50.0 - t * 2.0 * 50.0, 0.0, 80.0 - t * 2.0 * 30.0)
    } else if t < 0.8 {
        Colour::from_f64(0.0, 0.0, 50.0 - (t - 0.5) * 3.33 * 50.0)
    } else {
        Colour::from_f64(0.0, 0.0, (1.0 - t) * 5.0 * 10.0)
    };

    let star = (t * 100.0).sin() * (t * 63.0).cos() * (t * 42.0).sin();
    if star > 0.9 {
        base.brighten(150, 150, 150)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_palette_stops() {
        assert_eq!(fire_palette(100, 100), IN_SET);
        assert_eq!(fire_palette(0, 100), Colour::BLACK);
        assert_eq!(fire_palette(20, 100), Colour::new(255, 0, 0));
        assert_eq!(fire_palette(50, 100), Colour::new(255, 255, 0));
        assert_eq!(fire_palette(99, 100).b, 250);
    }

    #[test]
    fn monochrome_is_grey() {
        let colour = monochrome_gradient(50, 100);
        assert_eq!(colour, Colour::new(128, 128, 128));
    }

    #[test]
    fn ocean_depths_start_colour() {
        assert_eq!(ocean_depths(0, 100), Colour::new(0, 70, 100));
    }

    #[test]
    fn frozen_crystalline_is_light() {
        for iterations in 0..100 {
            let colour = frozen_crystalline(iterations, 100);
            assert!(colour.r >= 140 && colour.g >= 170 && colour.b >= 229);
        }
    }
}
