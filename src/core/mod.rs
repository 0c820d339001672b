pub mod actions;
pub mod colour_mapping;
pub mod data;
pub mod fractals;
pub mod util;
