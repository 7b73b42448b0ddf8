//! Affine floor / ceiling casting.
//!
//! For every row below the horizon the two edge rays of the view frustum
//! are intersected with the floor plane; the sample point is then stepped
//! linearly across the row. The ceiling row mirrored about the horizon
//! has the same distance, so both are painted in one pass.

use glam::Vec2;

use crate::{
    engine::projection::Screen,
    renderer::{Renderer, RendererExt, Rgba, rgb},
    world::{camera::Camera, texture::Texture},
};

/// Flat-mode fills.
pub const SKY: Rgba = rgb(135, 206, 235);
pub const GROUND: Rgba = rgb(128, 128, 128);

/// Inputs shared by every row of one frame.
#[derive(Clone, Copy, Debug)]
pub struct PlaneView {
    /// Camera position in tile units.
    pub pos: Vec2,
    /// Leftmost and rightmost frustum rays.
    pub ray_l: Vec2,
    pub ray_r: Vec2,
    /// Vertical focal length in pixels.
    pub focal: f32,
}

impl PlaneView {
    /// `dir ± plane`, where `plane = right · tan(FOV/2)`.
    pub fn new(camera: &Camera, tile: f32, focal: f32) -> Self {
        let dir = camera.forward();
        let plane = camera.right() * (camera.fov().to_radians() * 0.5).tan();
        Self {
            pos: camera.pos / tile,
            ray_l: dir - plane,
            ray_r: dir + plane,
            focal,
        }
    }

    /// Floor distance (in tiles) seen by a row `p` pixels below the
    /// horizon, for an eye half a tile above the floor.
    #[inline]
    pub fn row_distance(&self, p: f32) -> f32 {
        0.5 * self.focal / p
    }

    /// World sample (tile units) for screen column 0 and the per-column
    /// step along row `p`.
    #[inline]
    pub fn row_span(&self, p: f32, width: usize) -> (Vec2, Vec2) {
        let dist = self.row_distance(p);
        let step = dist * (self.ray_r - self.ray_l) / width.max(1) as f32;
        (self.pos + dist * self.ray_l, step)
    }
}

#[inline]
fn texel(tex: &Texture, frac: Vec2) -> Rgba {
    let u = (frac.x * tex.w as f32) as i32;
    let v = (frac.y * tex.h as f32) as i32;
    if tex.is_pow2() {
        tex.sample_masked(u, v)
    } else {
        tex.sample(u, v)
    }
}

/// Paint floor (below the horizon) and ceiling (mirrored above it).
pub fn draw_floor_ceiling<R: Renderer>(
    r: &mut R,
    screen: &Screen,
    view: &PlaneView,
    floor: &Texture,
    ceiling: &Texture,
) {
    let h = screen.h as i32;
    let mid = h / 2;

    for y in mid..h {
        // sample at the row centre so the horizon row stays finite
        let p = (y - mid) as f32 + 0.5;
        let (mut world, step) = view.row_span(p, screen.w);
        let ceil_y = h - 1 - y;

        for x in 0..screen.w as i32 {
            let frac = world - world.floor();
            r.put_pixel(x, y, texel(floor, frac));
            r.put_pixel(x, ceil_y, texel(ceiling, frac));
            world += step;
        }
    }
}

/// Flat mode: sky above the horizon, plain ground below.
pub fn draw_flat_backdrop<R: Renderer>(r: &mut R, screen: &Screen) {
    let mid = (screen.h / 2) as i32;
    r.clear(GROUND);
    r.set_draw_color(SKY);
    r.fill_rect(crate::renderer::ScreenRect::new(0, 0, screen.w as i32, mid));
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
