pub mod camera;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod texture;

pub use camera::Camera;

pub use geometry::{Rect, dir_from_deg, normalize_deg, wrap_delta_deg};

pub use grid::{Cell, GridMap};

pub use level::{LevelError, LevelManager, World};

pub use texture::{NO_TEXTURE, Surfaces, Texture, TextureBank, TextureError, TextureId};
