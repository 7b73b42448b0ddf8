//! Screen-space constants and the column/height maths every raster unit
//! shares.

use crate::world::geometry::{normalize_deg, wrap_delta_deg};

/// Upper clamp for a projected wall height; a ray that starts on a wall
/// face would otherwise divide by zero.
pub const MAX_WALL_HEIGHT: f32 = 16_384.0;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_w: f32, // pre-derived for speed
    pub half_h: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: w as f32 * 0.5,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Per-sweep projection constants.
///
/// `columns` is the ray count `N`; the main view uses one ray per screen
/// column, the minimap `screen width · scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov: f32,
    pub columns: usize,
    pub tile: f32,
    /// `(N/2) / tan(FOV/2)`
    pub plane_dist: f32,
    pub tan_half_fov: f32,
}

impl Projection {
    pub fn new(fov: f32, columns: usize, tile: f32) -> Self {
        let tan_half_fov = (fov.to_radians() * 0.5).tan();
        Self {
            fov,
            columns,
            tile,
            plane_dist: columns as f32 * 0.5 / tan_half_fov,
            tan_half_fov,
        }
    }

    /// Heading of ray `i`: `rotation − FOV/2 + i·FOV/N`, in `[0, 360)`.
    #[inline]
    pub fn ray_angle(&self, rotation: f32, i: usize) -> f32 {
        let step = self.fov / self.columns.max(1) as f32;
        normalize_deg(rotation - self.fov * 0.5 + i as f32 * step)
    }

    /// Fisheye correction: project the raw distance onto the view axis.
    #[inline]
    pub fn correct(raw: f32, ray_angle: f32, rotation: f32) -> f32 {
        raw * wrap_delta_deg(ray_angle - rotation).to_radians().cos()
    }

    /// Projected wall height for a corrected distance.
    ///
    /// Strictly decreasing in `corrected`, positive for every finite
    /// distance, zero for "no hit".
    #[inline]
    pub fn wall_height(&self, corrected: f32) -> f32 {
        if !corrected.is_finite() {
            return 0.0;
        }
        if corrected <= 0.0 {
            return MAX_WALL_HEIGHT;
        }
        (self.tile / corrected * self.plane_dist).min(MAX_WALL_HEIGHT)
    }

    /// Screen column of a point at angular offset `offset_deg` from the
    /// view axis: `(W/2)·(1 + tan(offset)/tan(FOV/2))`.
    #[inline]
    pub fn screen_x(&self, offset_deg: f32, screen: &Screen) -> f32 {
        screen.half_w * (1.0 + offset_deg.to_radians().tan() / self.tan_half_fov)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    fn proj() -> Projection {
        Projection::new(60.0, 1260, TILE_SIZE)
    }

    #[test]
    fn plane_distance_matches_formula() {
        let p = proj();
        let want = 630.0 / (30.0_f32).to_radians().tan();
        assert!((p.plane_dist - want).abs() < 1e-2);
    }

    #[test]
    fn wall_height_is_monotonic_and_positive() {
        let p = proj();
        let mut prev = f32::INFINITY;
        let mut d = 0.5;
        while d < 5_000.0 {
            let h = p.wall_height(d);
            assert!(h > 0.0, "height at {d} not positive");
            assert!(h <= prev, "height grew from {prev} to {h} at {d}");
            prev = h;
            d *= 1.1;
        }
        // strictly decreasing once off the clamp
        assert!(p.wall_height(100.0) > p.wall_height(101.0));
        assert_eq!(p.wall_height(f32::INFINITY), 0.0);
    }

    #[test]
    fn ray_angles_span_fov() {
        let p = Projection::new(60.0, 6, TILE_SIZE);
        assert!((p.ray_angle(0.0, 0) - 330.0).abs() < 1e-4);
        assert!((p.ray_angle(0.0, 3) - 0.0).abs() < 1e-4);
        assert!((p.ray_angle(90.0, 5) - 110.0).abs() < 1e-4);
    }

    #[test]
    fn correction_handles_wraparound() {
        // 350° vs 10° is a 20° offset, not 340°
        let c = Projection::correct(100.0, 350.0, 10.0);
        assert!((c - 100.0 * 20.0_f32.to_radians().cos()).abs() < 1e-3);
    }

    #[test]
    fn screen_x_centres_and_edges() {
        let p = proj();
        let s = Screen::new(1260, 720);
        assert!((p.screen_x(0.0, &s) - 630.0).abs() < 1e-3);
        assert!((p.screen_x(-30.0, &s) - 0.0).abs() < 1e-2);
        assert!((p.screen_x(30.0, &s) - 1260.0).abs() < 1e-2);
    }
}
