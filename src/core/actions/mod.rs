pub mod affine_preview;
pub mod cancellation;
pub mod colourise;
pub mod compute_chunk;
pub mod partition_chunks;
