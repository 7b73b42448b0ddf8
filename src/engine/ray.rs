//! Single-ray caster.
//!
//! A ray is marched against the two families of grid lines independently:
//! once across horizontal lines (`y = k·tile`) and once across vertical lines
//! (`x = k·tile`). Each scan stops at the first opaque cell behind the line
//! it crossed or when it leaves the map. The nearer of the two hits wins.
//!
//! Grid-line positions are recomputed from an integer line index on every
//! step, so no error accumulates however far the ray travels.

use glam::Vec2;

use crate::world::grid::{Cell, GridMap};

/// Below this, `sin`/`cos` are treated as zero and the matching scan is
/// skipped: an axis-parallel ray never crosses that family of lines.
const AXIS_EPS: f32 = 1e-6;

/// Which family of grid lines the ray crossed when it hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// A line `y = k·tile` (north or south face of a cell).
    Horizontal,
    /// A line `x = k·tile` (west or east face of a cell).
    Vertical,
}

/// Result of one cast. `distance == ∞` means "no hit".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
    pub orientation: Orientation,
    pub cell: Option<Cell>,
}

impl RayHit {
    /// The "no hit" sentinel.
    pub const NONE: RayHit = RayHit {
        distance: f32::INFINITY,
        point: Vec2::ZERO,
        orientation: Orientation::Horizontal,
        cell: None,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.cell.is_some() && self.distance.is_finite()
    }

    /// Position of the hit along the struck face, in `[0, 1)`.
    #[inline]
    pub fn face_offset(&self, tile: f32) -> f32 {
        let along = match self.orientation {
            Orientation::Horizontal => self.point.x,
            Orientation::Vertical => self.point.y,
        };
        (along.rem_euclid(tile) / tile).min(1.0 - f32::EPSILON)
    }
}

/// Ray-facing classification.
///
/// `down` is strictly `0 < a < 180` and `right` is `a < 90 || a > 270`;
/// `up` and `left` are their complements, so 0° and 180° count as "up"
/// and 90° and 270° count as "left". Those exact angles are also the ones
/// whose matching scan is skipped, so the tie never reaches a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing {
    pub down: bool,
    pub up: bool,
    pub right: bool,
    pub left: bool,
}

impl Facing {
    pub fn of(angle_deg: f32) -> Self {
        let down = angle_deg > 0.0 && angle_deg < 180.0;
        let right = angle_deg < 90.0 || angle_deg > 270.0;
        Self {
            down,
            up: !down,
            right,
            left: !right,
        }
    }
}

/// Cast one ray and return the nearest opaque cell it meets.
///
/// * `origin` – start point in the same units as `tile`.
/// * `angle_deg` – ray heading in `[0, 360)`.
/// * `tile` – cell edge length; pass a scaled tile (with a scaled origin)
///   to cast in minimap space.
///
/// An origin outside the map, or a ray that leaves the map without meeting
/// an opaque cell, yields [`RayHit::NONE`].
pub fn cast_ray(grid: &GridMap, origin: Vec2, angle_deg: f32, tile: f32) -> RayHit {
    let extent = grid.extent(tile);
    let inside = origin.x >= 0.0 && origin.y >= 0.0 && origin.x < extent.x && origin.y < extent.y;
    if !inside || !(tile > 0.0) {
        return RayHit::NONE;
    }

    let facing = Facing::of(angle_deg);
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    let h = if sin.abs() > AXIS_EPS {
        scan_horizontal(grid, origin, facing, cos / sin, tile, extent)
    } else {
        RayHit::NONE
    };
    let v = if cos.abs() > AXIS_EPS {
        scan_vertical(grid, origin, facing, sin / cos, tile, extent)
    } else {
        RayHit::NONE
    };

    // horizontal wins a tie
    if v.distance < h.distance { v } else { h }
}

/// Convenience wrapper: distance only (`∞` for no hit).
#[inline]
pub fn cast_distance(grid: &GridMap, origin: Vec2, angle_deg: f32, tile: f32) -> f32 {
    cast_ray(grid, origin, angle_deg, tile).distance
}

/*──────────────────────── per-axis scans ─────────────────────────────*/

/// Step across lines `y = k·tile`; `cot = cos/sin` gives Δx per unit Δy.
fn scan_horizontal(
    grid: &GridMap,
    origin: Vec2,
    facing: Facing,
    cot: f32,
    tile: f32,
    extent: Vec2,
) -> RayHit {
    let row = (origin.y / tile).floor() as i32;
    let (mut line, step) = if facing.down { (row + 1, 1) } else { (row, -1) };

    loop {
        let y = line as f32 * tile;
        let x = origin.x + (y - origin.y) * cot;
        if !(x >= 0.0 && x < extent.x && y >= 0.0 && y <= extent.y) {
            return RayHit::NONE;
        }

        // the cell on the far side of the line
        let cy = if facing.down { line } else { line - 1 };
        let cx = (x / tile).floor() as i32;
        match grid.cell(cx, cy) {
            None => return RayHit::NONE,
            Some(cell) if cell.is_opaque() => {
                let point = Vec2::new(x, y);
                return RayHit {
                    distance: (point - origin).length(),
                    point,
                    orientation: Orientation::Horizontal,
                    cell: Some(cell),
                };
            }
            Some(_) => line += step,
        }
    }
}

/// Step across lines `x = k·tile`; `tan = sin/cos` gives Δy per unit Δx.
fn scan_vertical(
    grid: &GridMap,
    origin: Vec2,
    facing: Facing,
    tan: f32,
    tile: f32,
    extent: Vec2,
) -> RayHit {
    let col = (origin.x / tile).floor() as i32;
    let (mut line, step) = if facing.right { (col + 1, 1) } else { (col, -1) };

    loop {
        let x = line as f32 * tile;
        let y = origin.y + (x - origin.x) * tan;
        if !(y >= 0.0 && y < extent.y && x >= 0.0 && x <= extent.x) {
            return RayHit::NONE;
        }

        let cx = if facing.right { line } else { line - 1 };
        let cy = (y / tile).floor() as i32;
        match grid.cell(cx, cy) {
            None => return RayHit::NONE,
            Some(cell) if cell.is_opaque() => {
                let point = Vec2::new(x, y);
                return RayHit {
                    distance: (point - origin).length(),
                    point,
                    orientation: Orientation::Vertical,
                    cell: Some(cell),
                };
            }
            Some(_) => line += step,
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
