use crate::world::{geometry::Rect, texture::TextureId};

/// World-space footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body(pub Rect);

/// Pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);

/// Direction of travel in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading(pub f32);

/// Billboard texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite(pub TextureId);

/// Tag for entities created from spawn markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy;
