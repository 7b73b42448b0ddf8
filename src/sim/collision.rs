//! Axis-aligned rectangles against the tile grid.
//!
//! Moves are applied one axis at a time; an axis whose move lands the
//! rectangle inside a blocking cell is reverted, so bodies slide along
//! walls instead of sticking.

use glam::{IVec2, Vec2};

use crate::world::{
    geometry::Rect,
    grid::{Cell, GridMap},
};

/// Which axes of a move were reverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub blocked_x: bool,
    pub blocked_y: bool,
}

impl MoveResult {
    #[inline]
    pub fn hit_wall(&self) -> bool {
        self.blocked_x || self.blocked_y
    }
}

/// World rectangle of cell `(cx, cy)`.
#[inline]
pub fn cell_rect(cx: i32, cy: i32, tile: f32) -> Rect {
    Rect::new(cx as f32 * tile, cy as f32 * tile, tile, tile)
}

/// Cells whose squares `r` overlaps.
pub fn cells_under(r: &Rect, tile: f32) -> impl Iterator<Item = IVec2> {
    let lo = GridMap::world_to_cell(r.pos, tile);
    let hi = GridMap::world_to_cell(r.pos + r.size, tile);
    (lo.y..=hi.y).flat_map(move |y| (lo.x..=hi.x).map(move |x| IVec2::new(x, y)))
}

/// True if `r` intersects any cell matching `pred`. Cells outside the map
/// count as blocking.
pub fn overlaps_cell(grid: &GridMap, r: &Rect, tile: f32, pred: impl Fn(Cell) -> bool) -> bool {
    cells_under(r, tile).any(|c| {
        let solid = grid.cell(c.x, c.y).is_none_or(&pred);
        solid && r.intersects(&cell_rect(c.x, c.y, tile))
    })
}

/// True if `r` touches a wall or boundary cell.
#[inline]
pub fn blocked(grid: &GridMap, r: &Rect, tile: f32) -> bool {
    overlaps_cell(grid, r, tile, Cell::is_blocking)
}

/// Move `body` by `delta`, x first then y, reverting any blocked axis.
pub fn try_move(grid: &GridMap, body: &mut Rect, delta: Vec2, tile: f32) -> MoveResult {
    let mut res = MoveResult::default();

    if delta.x != 0.0 {
        let moved = body.translated(Vec2::new(delta.x, 0.0));
        if blocked(grid, &moved, tile) {
            res.blocked_x = true;
        } else {
            *body = moved;
        }
    }
    if delta.y != 0.0 {
        let moved = body.translated(Vec2::new(0.0, delta.y));
        if blocked(grid, &moved, tile) {
            res.blocked_y = true;
        } else {
            *body = moved;
        }
    }
    res
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;

    const T: f32 = TILE_SIZE;

    fn body_at(center: Vec2) -> Rect {
        Rect::new(0.0, 0.0, T / 3.0, T / 3.0).centered_at(center)
    }

    #[test]
    fn touching_a_wall_is_not_blocked() {
        let grid = GridMap::default();
        // flush against the west boundary face (x = 60)
        let r = Rect::new(T, 100.0, 20.0, 20.0);
        assert!(!blocked(&grid, &r, T));
        assert!(blocked(&grid, &r.translated(Vec2::new(-0.5, 0.0)), T));
    }

    #[test]
    fn free_move_is_applied() {
        let grid = GridMap::default();
        let mut b = body_at(GridMap::cell_center(5, 5));
        let start = b.pos;
        let res = try_move(&grid, &mut b, Vec2::new(10.0, -4.0), T);
        assert!(!res.hit_wall());
        assert_eq!(b.pos, start + Vec2::new(10.0, -4.0));
    }

    #[test]
    fn blocked_axis_reverts_and_other_slides() {
        let mut grid = GridMap::default();
        grid.set(6, 5, Cell::Wall);
        let mut b = body_at(Vec2::new(6.0 * T - 12.0, 5.5 * T));
        let start = b.pos;
        let res = try_move(&grid, &mut b, Vec2::new(8.0, 5.0), T);
        assert_eq!(
            res,
            MoveResult {
                blocked_x: true,
                blocked_y: false
            }
        );
        assert_eq!(b.pos, start + Vec2::new(0.0, 5.0));
    }

    #[test]
    fn exit_and_spawn_cells_are_walkable() {
        let mut grid = GridMap::default();
        grid.set(6, 5, Cell::Exit);
        grid.set(7, 5, Cell::Spawn);
        let mut b = body_at(GridMap::cell_center(5, 5));
        let res = try_move(&grid, &mut b, Vec2::new(2.0 * T, 0.0), T);
        assert!(!res.hit_wall());
        assert_eq!(GridMap::world_to_cell(b.center(), T), IVec2::new(7, 5));
    }

    #[test]
    fn leaving_the_map_is_blocked() {
        let grid = GridMap::new(3, 3);
        let mut b = body_at(Vec2::new(20.0, 20.0));
        let res = try_move(&grid, &mut b, Vec2::new(-30.0, 0.0), T);
        assert!(res.blocked_x);
    }
}
