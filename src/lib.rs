//! MazeMania: a grid-based first-person maze rendered by ray casting.
//!
//! * [`world`]    – grid maps, the player pose, textures and the level set.
//! * [`assets`]   – level-file and image loading.
//! * [`engine`]   – the ray caster, sweep, wall/floor/sprite texturers, minimap.
//! * [`renderer`] – the drawing-surface abstraction and its CPU backend.
//! * [`sim`]      – input, collision and the enemy ECS.

pub mod assets;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
