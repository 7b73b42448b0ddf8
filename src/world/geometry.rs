use glam::Vec2;

/*------------------------- angles -----------------------------------*/

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f32) -> f32 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Wrap an angle difference into `(-180, 180]`.
#[inline]
pub fn wrap_delta_deg(deg: f32) -> f32 {
    let a = normalize_deg(deg);
    if a > 180.0 { a - 360.0 } else { a }
}

/// Unit direction for an angle in degrees (0° = +x, 90° = +y / screen down).
#[inline]
pub fn dir_from_deg(deg: f32) -> Vec2 {
    let (s, c) = deg.to_radians().sin_cos();
    Vec2::new(c, s)
}

/*------------------------- rectangles -------------------------------*/

/// Axis-aligned rectangle in world pixels; `pos` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Same size, moved so that its centre is `c`.
    pub fn centered_at(&self, c: Vec2) -> Self {
        Self {
            pos: c - self.size * 0.5,
            size: self.size,
        }
    }

    pub fn translated(&self, d: Vec2) -> Self {
        Self {
            pos: self.pos + d,
            size: self.size,
        }
    }

    /// Overlap test with exclusive edges: rectangles that only touch do not
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.bottom() <= other.top()
            || self.top() >= other.bottom()
            || self.right() <= other.left()
            || self.left() >= other.right())
    }
}
