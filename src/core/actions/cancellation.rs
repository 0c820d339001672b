use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// Monotonic pass counter shared between the engine and its coordinator.
///
/// Every render, preview or cancel advances it; results tagged with an older
/// generation are stale.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicU64>,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Starts a new generation and returns it.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Token that reports cancelled once the counter moves past `generation`.
    #[must_use]
    pub fn token(&self, generation: u64) -> GenerationToken {
        GenerationToken {
            current: Arc::clone(&self.current),
            generation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl GenerationToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl CancelToken for GenerationToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}
