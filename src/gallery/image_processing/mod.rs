// Image processing module - variant sizing and output encoding
pub mod formats;
mod resize;

// Re-export public items
pub use resize::{needs_downscale, prepare_image};
