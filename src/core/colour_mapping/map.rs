use crate::core::data::colour::Colour;

/// Maps an escape count to a colour.
///
/// Implementations must be pure: the same `(iterations, max_iterations)`
/// always yields the same colour, which is what makes recolouring a cached
/// iteration buffer possible.
pub trait ColourScheme: Send + Sync {
    fn colour(&self, iterations: u32, max_iterations: u32) -> Colour;
}

impl<F> ColourScheme for F
where
    F: Fn(u32, u32) -> Colour + Send + Sync,
{
    #[inline]
    fn colour(&self, iterations: u32, max_iterations: u32) -> Colour {
        self(iterations, max_iterations)
    }
}
