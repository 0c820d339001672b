use std::error::Error;
use std::fmt;

use crate::core::actions::compute_chunk::compute_chunk;
use crate::core::data::render_chunk::RenderChunk;
use crate::workers::messages::{ChunkComplete, RenderChunkRequest};
use crate::workers::pool::{PoolError, WorkerPool};

pub type ChunkPool = WorkerPool<RenderChunkRequest, ChunkComplete>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTaskError {
    EmptyCanvas,
    ChunkOutsideCanvas {
        chunk: RenderChunk,
        canvas_width: u32,
        canvas_height: u32,
    },
}

impl fmt::Display for ChunkTaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCanvas => write!(f, "cannot render a chunk of an empty canvas"),
            Self::ChunkOutsideCanvas {
                chunk,
                canvas_width,
                canvas_height,
            } => write!(
                f,
                "chunk {}x{} at ({}, {}) does not fit a {}x{} canvas",
                chunk.width(),
                chunk.height(),
                chunk.start_x(),
                chunk.start_y(),
                canvas_width,
                canvas_height
            ),
        }
    }
}

impl Error for ChunkTaskError {}

/// Worker body: computes the escape counts for one chunk request.
pub fn render_chunk(request: RenderChunkRequest) -> Result<ChunkComplete, ChunkTaskError> {
    let RenderChunkRequest {
        chunk,
        parameters,
        canvas_width,
        canvas_height,
        chunk_index,
        task_id,
        fractal,
    } = request;

    if canvas_width == 0 || canvas_height == 0 {
        return Err(ChunkTaskError::EmptyCanvas);
    }

    if !chunk.fits_within(canvas_width, canvas_height) {
        return Err(ChunkTaskError::ChunkOutsideCanvas {
            chunk,
            canvas_width,
            canvas_height,
        });
    }

    let buffer = compute_chunk(chunk, canvas_width, canvas_height, &parameters, fractal.kernel());

    Ok(ChunkComplete {
        chunk,
        chunk_index,
        task_id,
        buffer,
    })
}

pub fn spawn_chunk_pool(worker_count: usize) -> Result<ChunkPool, PoolError> {
    WorkerPool::new("chunk-worker", worker_count, render_chunk)
}
