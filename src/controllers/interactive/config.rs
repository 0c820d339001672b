use crate::core::actions::partition_chunks::ChunkOptions;
use crate::core::colour_mapping::schemes::DEFAULT_SCHEME;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::worker_count::optimal_worker_count;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// `None` sizes the pool from the machine's core count.
    pub workers: Option<usize>,
    pub chunks: ChunkOptions,
    pub fractal: FractalKind,
    /// Scheme used until one is applied; unknown names fall back to the
    /// registry default.
    pub default_scheme: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            chunks: ChunkOptions::default(),
            fractal: FractalKind::default(),
            default_scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.filter(|&count| count > 0).unwrap_or_else(optimal_worker_count)
    }
}
