pub mod engine;
pub mod recolour;
