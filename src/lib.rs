//! Chunked, parallel, cancellable escape-time fractal rendering.
//!
//! [`FractalEngine`] partitions a surface into centre-out chunks, computes
//! them on a [`WorkerPool`], paints results progressively and keeps the
//! iteration counts for instant recolouring and preview transforms.

pub mod controllers;
pub mod core;
pub mod presenters;
pub mod workers;

pub use crate::controllers::interactive::{
    EngineConfig, EngineError, FractalEngine, RecolourError, RenderEvent, RenderHandle, RenderOutcome,
    RenderState, RenderSurface,
};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::core::actions::partition_chunks::{ChunkOptions, chunk_size, partition_chunks};
pub use crate::core::colour_mapping::map::ColourScheme;
pub use crate::core::colour_mapping::registry::ColourSchemeRegistry;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::fractal_params::{FractalParameters, ParametersError, ViewAnchor};
pub use crate::core::data::iteration_buffer::IterationBuffer;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::render_chunk::RenderChunk;
pub use crate::core::fractals::fractal_kinds::FractalKind;
pub use crate::core::util::coords::{pixel_to_plane, plane_to_pixel};
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::presenters::frame::frame_surface::FrameSurface;
pub use crate::workers::{TaskError, TaskHandle, WorkerPool};
