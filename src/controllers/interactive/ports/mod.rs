//! Port definitions for the interactive controller.
//!
//! The engine paints through [`RenderSurface`]; whatever owns the real
//! canvas implements it.

pub mod surface;

pub use surface::RenderSurface;
