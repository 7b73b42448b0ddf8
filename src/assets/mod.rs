pub mod images;
pub mod levels;
pub mod loader;

pub use images::{ImageError, load_texture};
pub use levels::{LevelFileError, format_levels, parse_levels, read_levels, write_levels};
pub use loader::{LoadError, load_surfaces, load_world};
