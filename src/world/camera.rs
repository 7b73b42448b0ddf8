use glam::Vec2;

use super::geometry::{dir_from_deg, normalize_deg};

/// Player view-point in world space.
///
/// * Position is in the map's pixel space (`y` grows downward).
/// * `rotation` is in **degrees**, always kept in `[0, 360)`;
///   0° looks along +x, 90° looks along +y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    rotation: f32,
    fov: f32, // horizontal FoV in degrees
}

impl Camera {
    pub fn new(pos: Vec2, rotation: f32, fov: f32) -> Self {
        Self {
            pos,
            rotation: normalize_deg(rotation),
            fov,
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_rotation(&mut self, deg: f32) {
        self.rotation = normalize_deg(deg);
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        dir_from_deg(self.rotation)
    }

    /// Unit vector pointing to the camera's right (clockwise on screen).
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// World-space displacement for `forward` units ahead and `side` units
    /// to the right. Does not move the camera.
    pub fn step_delta(self, forward: f32, side: f32) -> Vec2 {
        self.forward() * forward + self.right() * side
    }

    /// Rotate by `delta` degrees (positive = clockwise on screen).
    pub fn turn(&mut self, delta: f32) {
        self.rotation = normalize_deg(self.rotation + delta);
    }

    /*───────────────── projection / frustum helpers ─────────────────*/

    /// Distance to the projection plane for a sweep of `columns` rays.
    ///
    /// ```text
    /// focal = (columns / 2) / tan(fov / 2)
    /// ```
    #[inline]
    pub fn screen_scale(self, columns: usize) -> f32 {
        (columns as f32) * 0.5 / (self.fov.to_radians() * 0.5).tan()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(Vec2::ZERO, 17.0, 60.0);
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((f.dot(r)).abs() < 1e-5);
    }

    #[test]
    fn right_of_east_is_down() {
        let cam = Camera::new(Vec2::ZERO, 0.0, 60.0);
        assert!((cam.right() - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn screen_scale_at_90_deg() {
        let cam = Camera::new(Vec2::ZERO, 0.0, 90.0);
        assert!((cam.screen_scale(640) - 320.0).abs() < 1e-2);
    }

    #[test]
    fn rotation_stays_normalized() {
        let mut cam = Camera::new(Vec2::ZERO, -90.0, 60.0);
        assert!((cam.rotation() - 270.0).abs() < 1e-4);
        cam.turn(100.0);
        assert!((cam.rotation() - 10.0).abs() < 1e-4);
        cam.turn(-20.0);
        assert!((cam.rotation() - 350.0).abs() < 1e-4);
    }
}
