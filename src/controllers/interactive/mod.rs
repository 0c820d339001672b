//! Interactive render orchestration.
//!
//! # Architecture
//!
//! The engine follows the ports & adapters pattern:
//! - **Input**: parameter updates plus `render` / `preview` / `cancel_rendering`
//!   / `apply_color_scheme` calls from the UI layer
//! - **Output**: the [`RenderSurface`] port and a [`RenderEvent`] stream
//! - **Core**: chunk partitioning, colouring and preview transforms from `core/`,
//!   chunk computation on the `workers` pool

pub mod config;
mod engine;
pub mod errors;
pub mod events;
pub mod ports;

pub use config::EngineConfig;
pub use engine::FractalEngine;
pub use errors::engine::EngineError;
pub use errors::recolour::RecolourError;
pub use events::{RenderEvent, RenderHandle, RenderOutcome, RenderState};
pub use ports::RenderSurface;
