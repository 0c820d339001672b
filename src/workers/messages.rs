//! Messages crossing the worker boundary.
//!
//! The chunk request and result are plain serde structs tagged with a `type`
//! field, so the same shapes can be logged or sent to an out-of-process
//! worker. The pool envelopes wrap any payload with routing data.

use serde::{Deserialize, Serialize};

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::render_chunk::RenderChunk;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::workers::pool::TaskError;

/// `{"type": "renderChunk", ...}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "renderChunk", rename_all = "camelCase")]
pub struct RenderChunkRequest {
    pub chunk: RenderChunk,
    pub parameters: FractalParameters,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub chunk_index: usize,
    pub task_id: u64,
    #[serde(default)]
    pub fractal: FractalKind,
}

/// `{"type": "chunkComplete", ...}`; `buffer` holds the chunk's escape
/// counts row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "chunkComplete", rename_all = "camelCase")]
pub struct ChunkComplete {
    pub chunk: RenderChunk,
    pub chunk_index: usize,
    pub task_id: u64,
    pub buffer: Vec<u32>,
}

/// Dispatcher to worker.
#[derive(Debug)]
pub(crate) enum WorkerCommand<Req> {
    Run { task_id: u64, payload: Req },
}

/// Worker to dispatcher. `Ready` carries no task id and is never a result.
#[derive(Debug)]
pub(crate) enum WorkerReply<Resp> {
    Ready {
        worker: usize,
    },
    Finished {
        worker: usize,
        task_id: u64,
        outcome: Result<Resp, TaskError>,
    },
}
