//! Overhead map drawn in the top-left corner of the frame.
//!
//! Uses the same caster as the 3-D view, with origin and tile size
//! multiplied by the minimap scale.

use glam::Vec2;

use crate::{
    engine::{projection::Projection, ray::cast_ray},
    renderer::{Renderer, Rgba, ScreenRect, rgb},
    world::{
        camera::Camera,
        grid::{Cell, GridMap},
    },
};

pub const BOUNDARY_COLOR: Rgba = rgb(139, 69, 19);
pub const OPEN_COLOR: Rgba = rgb(128, 128, 128);
pub const WALL_COLOR: Rgba = rgb(34, 139, 34);
pub const EXIT_COLOR: Rgba = rgb(255, 253, 208);
pub const RAY_COLOR: Rgba = rgb(255, 0, 0);
pub const PLAYER_COLOR: Rgba = rgb(255, 255, 0);
pub const ENEMY_COLOR: Rgba = rgb(200, 0, 200);

#[inline]
pub fn cell_color(cell: Cell) -> Rgba {
    match cell {
        Cell::Boundary => BOUNDARY_COLOR,
        Cell::Wall => WALL_COLOR,
        Cell::Exit => EXIT_COLOR,
        Cell::Open | Cell::Spawn => OPEN_COLOR,
    }
}

/// Scaled overhead view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    pub scale: f32,
    /// World tile edge (unscaled).
    pub tile: f32,
}

impl Minimap {
    pub fn new(scale: f32, tile: f32) -> Self {
        Self { scale, tile }
    }

    #[inline]
    pub fn tile_px(&self) -> f32 {
        self.tile * self.scale
    }

    #[inline]
    pub fn to_map(&self, world: Vec2) -> Vec2 {
        world * self.scale
    }

    /// Ray count for a screen `width` pixels wide.
    #[inline]
    pub fn ray_count(&self, width: usize) -> usize {
        ((width as f32 * self.scale) as usize).max(1)
    }

    pub fn draw_tiles<R: Renderer>(&self, r: &mut R, grid: &GridMap) {
        let t = self.tile_px();
        for (x, y, cell) in grid.iter() {
            // integer edges from the scaled grid lines, so tiles tile exactly
            let x0 = (x as f32 * t) as i32;
            let y0 = (y as f32 * t) as i32;
            let x1 = ((x + 1) as f32 * t) as i32;
            let y1 = ((y + 1) as f32 * t) as i32;
            r.set_draw_color(cell_color(cell));
            r.fill_rect(ScreenRect::new(x0, y0, x1 - x0, y1 - y0));
        }
    }

    /// Sweep the field of view in map space and draw each ray up to its
    /// hit. Rays that hit nothing are not drawn.
    pub fn draw_rays<R: Renderer>(&self, r: &mut R, grid: &GridMap, camera: &Camera, width: usize) {
        let proj = Projection::new(camera.fov(), self.ray_count(width), self.tile_px());
        let origin = self.to_map(camera.pos);
        r.set_draw_color(RAY_COLOR);
        for i in 0..proj.columns {
            let angle = proj.ray_angle(camera.rotation(), i);
            let hit = cast_ray(grid, origin, angle, proj.tile);
            if hit.is_hit() {
                r.draw_line(
                    origin.x as i32,
                    origin.y as i32,
                    hit.point.x as i32,
                    hit.point.y as i32,
                );
            }
        }
    }

    /// Small filled square centred on a world position.
    pub fn draw_marker<R: Renderer>(&self, r: &mut R, world: Vec2, size: f32, color: Rgba) {
        let c = self.to_map(world);
        let s = (size * self.scale).max(2.0);
        r.set_draw_color(color);
        r.fill_rect(ScreenRect::new(
            (c.x - s * 0.5) as i32,
            (c.y - s * 0.5) as i32,
            s as i32,
            s as i32,
        ));
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
