pub mod engine;
pub mod minimap;
pub mod planes;
pub mod projection;
pub mod ray;
pub mod sprites;
pub mod sweep;
pub mod walls;

pub use engine::Engine;

pub use projection::{Projection, Screen};

pub use ray::{Orientation, RayHit, cast_ray};

pub use sweep::{Column, DepthBuffer};
