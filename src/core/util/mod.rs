pub mod coords;
pub mod worker_count;
