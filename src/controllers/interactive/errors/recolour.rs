use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecolourError {
    /// No render pass has allocated an iteration buffer yet.
    NoIterationData,
    UnknownScheme(String),
    /// The surface reported no size.
    NoSurface,
}

impl fmt::Display for RecolourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIterationData => write!(f, "no iteration data to recolour yet"),
            Self::UnknownScheme(name) => write!(f, "unknown colour scheme: {}", name),
            Self::NoSurface => write!(f, "render surface is not available"),
        }
    }
}

impl Error for RecolourError {}
