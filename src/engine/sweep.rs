//! Field-of-view sweep: one ray per column, fisheye-corrected, written
//! into a column list and the per-column depth buffer.
//!
//! Columns are independent, so the sweep runs on the rayon pool; every
//! worker owns exactly one `Column` slot and one depth slot. Painting the
//! result is done afterwards, serially.

use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use super::{
    projection::Projection,
    ray::{RayHit, cast_ray},
};
use crate::world::{camera::Camera, grid::GridMap};

/// Everything the painters need to know about one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    pub angle: f32,
    pub hit: RayHit,
    /// Fisheye-corrected distance (`∞` when the ray hit nothing).
    pub corrected: f32,
    pub height: f32,
    /// Position along the struck face in `[0, 1)`.
    pub face: f32,
}

impl Column {
    pub const EMPTY: Column = Column {
        angle: 0.0,
        hit: RayHit::NONE,
        corrected: f32::INFINITY,
        height: 0.0,
        face: 0.0,
    };

    /// Horizontal texel for a texture `tex_w` wide.
    #[inline]
    pub fn tex_x(&self, tex_w: usize) -> i32 {
        let w = tex_w.max(1) as i32;
        ((self.face * tex_w as f32) as i32).rem_euclid(w)
    }
}

/// Per-column nearest-wall distance, rebuilt every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepthBuffer {
    depth: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(columns: usize) -> Self {
        Self {
            depth: vec![f32::INFINITY; columns],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Depth at `col`; columns outside the buffer read as open space.
    #[inline]
    pub fn get(&self, col: i32) -> f32 {
        usize::try_from(col)
            .ok()
            .and_then(|c| self.depth.get(c).copied())
            .unwrap_or(f32::INFINITY)
    }

    #[inline]
    pub fn set(&mut self, col: usize, d: f32) {
        if let Some(slot) = self.depth.get_mut(col) {
            *slot = d;
        }
    }

    pub fn reset(&mut self, columns: usize) {
        self.depth.clear();
        self.depth.resize(columns, f32::INFINITY);
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.depth
    }
}

/// Cast `proj.columns` rays from `camera` and fill `out` / `depth`.
///
/// Results depend only on the pose and the grid; nothing carries from
/// one column to the next.
pub fn sweep(
    grid: &GridMap,
    camera: &Camera,
    proj: &Projection,
    out: &mut Vec<Column>,
    depth: &mut DepthBuffer,
) {
    let n = proj.columns;
    out.clear();
    out.resize(n, Column::EMPTY);
    depth.reset(n);

    let rotation = camera.rotation();
    let origin = camera.pos;

    out.par_iter_mut()
        .zip(depth.depth.par_iter_mut())
        .enumerate()
        .for_each(|(i, (col, d))| {
            *col = cast_column(grid, origin, rotation, proj, i);
            *d = col.corrected;
        });
}

/// Single-column body of [`sweep`], usable on its own.
pub fn cast_column(
    grid: &GridMap,
    origin: glam::Vec2,
    rotation: f32,
    proj: &Projection,
    i: usize,
) -> Column {
    let angle = proj.ray_angle(rotation, i);
    let hit = cast_ray(grid, origin, angle, proj.tile);
    if !hit.is_hit() {
        return Column {
            angle,
            ..Column::EMPTY
        };
    }
    let corrected = Projection::correct(hit.distance, angle, rotation);
    Column {
        angle,
        hit,
        corrected,
        height: proj.wall_height(corrected),
        face: hit.face_offset(proj.tile),
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
