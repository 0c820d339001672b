//! Parallel execution contexts for chunk computation.
//!
//! [`pool::WorkerPool`] is payload-agnostic; [`chunk_worker`] plugs the
//! escape-time chunk renderer into it.

pub mod chunk_worker;
pub mod messages;
pub mod pool;

pub use chunk_worker::{ChunkPool, ChunkTaskError, render_chunk, spawn_chunk_pool};
pub use messages::{ChunkComplete, RenderChunkRequest};
pub use pool::{PoolError, TaskError, TaskHandle, TaskResult, WorkerPool};
