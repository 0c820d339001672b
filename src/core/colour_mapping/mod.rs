pub mod hsl;
pub mod map;
pub mod registry;
pub mod schemes;
