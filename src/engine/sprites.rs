use glam::Vec2;

use crate::{
    engine::{
        projection::{MAX_WALL_HEIGHT, Projection, Screen},
        sweep::DepthBuffer,
    },
    renderer::Renderer,
    world::{
        camera::Camera,
        geometry::wrap_delta_deg,
        texture::{TextureBank, TextureId},
    },
};

/// A billboard in world space: standing on the floor at `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub center: Vec2,
    /// World height (and width) of the billboard.
    pub size: f32,
    pub tex: TextureId,
}

/// A billboard projected to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisSprite {
    /// Screen column of the sprite centre.
    pub screen_x: f32,
    /// Distance along the view axis; compared against the depth buffer.
    pub perp: f32,
    /// On-screen height in pixels.
    pub height: f32,
    /// Screen row the sprite stands on.
    pub floor_y: f32,
    pub tex: TextureId,
}

/// Billboards closer than this (world px along the view axis) are not drawn.
pub const NEAR_PLANE: f32 = 1.0;

impl VisSprite {
    /// Single-sample depth test at the sprite's centre column, clamped to
    /// the buffer so a sprite on the FOV edge still samples a real column.
    #[inline]
    pub fn is_occluded(&self, depth: &DepthBuffer) -> bool {
        if depth.is_empty() {
            return false;
        }
        let col = (self.screen_x as i32).clamp(0, depth.len() as i32 - 1);
        depth.get(col) < self.perp
    }
}

/// Project one billboard; `None` when it lies outside the field of view.
pub fn project(
    b: &Billboard,
    camera: &Camera,
    proj: &Projection,
    screen: &Screen,
) -> Option<VisSprite> {
    let rel = b.center - camera.pos;
    let dist = rel.length();
    if dist <= f32::EPSILON {
        return None;
    }

    let bearing = rel.y.atan2(rel.x).to_degrees();
    let offset = wrap_delta_deg(bearing - camera.rotation());
    if offset.abs() > proj.fov * 0.5 {
        return None;
    }

    let perp = dist * offset.to_radians().cos();
    if perp < NEAR_PLANE {
        return None;
    }

    Some(VisSprite {
        screen_x: proj.screen_x(offset, screen),
        perp,
        height: (b.size / perp * proj.plane_dist).min(MAX_WALL_HEIGHT),
        floor_y: screen.half_h + (0.5 * proj.tile / perp * proj.plane_dist).min(MAX_WALL_HEIGHT),
        tex: b.tex,
    })
}

/// Project, depth-test and sort far-to-near.
pub fn collect_visible(
    billboards: &[Billboard],
    camera: &Camera,
    proj: &Projection,
    screen: &Screen,
    depth: &DepthBuffer,
) -> Vec<VisSprite> {
    let mut out: Vec<VisSprite> = billboards
        .iter()
        .filter_map(|b| project(b, camera, proj, screen))
        .filter(|s| !s.is_occluded(depth))
        .collect();

    // far-to-near painter's algorithm so we overdraw correctly
    out.sort_by(|a, b| b.perp.total_cmp(&a.perp));
    out
}

/// Paint one projected sprite; texels with zero alpha are skipped.
pub fn draw_sprite<R: Renderer>(r: &mut R, screen: &Screen, spr: &VisSprite, bank: &TextureBank) {
    let tex = bank.texture_or_missing(spr.tex);
    let sprite_h = spr.height;
    let sprite_w = sprite_h * tex.w as f32 / tex.h.max(1) as f32;
    if sprite_h < 1.0 || sprite_w < 1.0 {
        return;
    }

    let x0 = (spr.screen_x - sprite_w * 0.5).floor() as i32;
    let x1 = (spr.screen_x + sprite_w * 0.5).ceil() as i32;
    let y0 = (spr.floor_y - sprite_h).floor() as i32; // top
    let y1 = spr.floor_y.ceil() as i32; // bottom (touching floor)

    let u_step = tex.w as f32 / (x1 - x0).max(1) as f32;
    let v_step = tex.h as f32 / (y1 - y0).max(1) as f32;

    for x in x0.max(0)..x1.min(screen.w as i32) {
        let u = ((x - x0) as f32 * u_step) as i32;
        for y in y0.max(0)..y1.min(screen.h as i32) {
            let v = ((y - y0) as f32 * v_step) as i32;
            let color = tex.sample(u, v);
            if color >> 24 != 0 {
                r.put_pixel(x, y, color);
            }
        }
    }
}

/// Draw every visible billboard over the walls.
pub fn draw_sprites<R: Renderer>(
    r: &mut R,
    screen: &Screen,
    sprites: &[VisSprite],
    bank: &TextureBank,
) {
    for spr in sprites {
        draw_sprite(r, screen, spr, bank);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
