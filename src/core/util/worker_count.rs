pub const MIN_WORKERS: usize = 2;
pub const MAX_WORKERS: usize = 16;
const FALLBACK_CORES: usize = 4;

/// Worker pool size for this machine: three quarters of the logical cores,
/// kept within `MIN_WORKERS..=MAX_WORKERS`.
#[must_use]
pub fn optimal_worker_count() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_CORES);

    worker_count_for_cores(cores)
}

#[must_use]
pub fn worker_count_for_cores(cores: usize) -> usize {
    (cores * 3 / 4).clamp(MIN_WORKERS, MAX_WORKERS)
}
