#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from floating point channels, rounding and clamping
    /// each one to `0..=255`.
    #[must_use]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Adds per-channel amounts, saturating at 255.
    #[must_use]
    pub fn brighten(self, r: u8, g: u8, b: u8) -> Self {
        Self {
            r: self.r.saturating_add(r),
            g: self.g.saturating_add(g),
            b: self.b.saturating_add(b),
        }
    }

    #[must_use]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }

    value.round().clamp(0.0, 255.0) as u8
}
