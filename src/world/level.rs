use glam::Vec2;
use thiserror::Error;
use tracing::info;

use super::{camera::Camera, grid::GridMap};
use crate::config::LEVEL_COUNT;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("level index {0} out of range ({LEVEL_COUNT} levels)")]
    OutOfRange(usize),

    #[error("level set holds {0} maps, expected {LEVEL_COUNT}")]
    WrongCount(usize),

    #[error("level {0} has no open cell to start on")]
    NoStart(usize),
}

/// Exclusive owner of every level grid; hands out the active one read-only.
#[derive(Clone, Debug)]
pub struct LevelManager {
    levels: Vec<GridMap>,
    current: usize,
}

impl LevelManager {
    pub fn new(levels: Vec<GridMap>) -> Result<Self, LevelError> {
        if levels.len() != LEVEL_COUNT {
            return Err(LevelError::WrongCount(levels.len()));
        }
        Ok(Self { levels, current: 0 })
    }

    /// Borrow the grid the player is currently in.
    #[inline]
    pub fn active(&self) -> &GridMap {
        &self.levels[self.current]
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// 1-based level number (drives enemy count).
    #[inline]
    pub fn level_number(&self) -> usize {
        self.current + 1
    }

    pub fn level(&self, idx: usize) -> Option<&GridMap> {
        self.levels.get(idx)
    }

    pub fn levels(&self) -> &[GridMap] {
        &self.levels
    }

    pub fn switch_to(&mut self, idx: usize) -> Result<&GridMap, LevelError> {
        if idx >= self.levels.len() {
            return Err(LevelError::OutOfRange(idx));
        }
        self.current = idx;
        info!(level = idx + 1, "switched level");
        Ok(&self.levels[idx])
    }

    /// Go to the next level, wrapping after the last one.
    pub fn advance(&mut self) -> &GridMap {
        self.current = (self.current + 1) % self.levels.len();
        info!(level = self.current + 1, "advanced to next level");
        &self.levels[self.current]
    }

    /// Swap a whole level grid (the only way a grid ever changes).
    pub fn replace(&mut self, idx: usize, grid: GridMap) -> Result<(), LevelError> {
        let slot = self.levels.get_mut(idx).ok_or(LevelError::OutOfRange(idx))?;
        *slot = grid;
        Ok(())
    }
}

/// Everything a frame reads: the level set, the player and the enemies.
///
/// Owned by the main loop and passed by reference to the renderer and the
/// simulation systems.
pub struct World {
    pub levels: LevelManager,
    pub player: Camera,
    /// Player footprint edge in world pixels.
    pub player_size: f32,
    pub actors: hecs::World,
}

impl World {
    pub fn new(levels: LevelManager, fov: f32, player_size: f32) -> Result<Self, LevelError> {
        let mut world = Self {
            levels,
            player: Camera::new(Vec2::ZERO, 0.0, fov),
            player_size,
            actors: hecs::World::new(),
        };
        world.reset_player()?;
        Ok(world)
    }

    #[inline]
    pub fn grid(&self) -> &GridMap {
        self.levels.active()
    }

    /// Put the player at the centre of the active level's start cell.
    pub fn reset_player(&mut self) -> Result<(), LevelError> {
        let start = self
            .grid()
            .start_cell()
            .ok_or(LevelError::NoStart(self.levels.current()))?;
        self.player.pos = GridMap::cell_center(start.x, start.y);
        self.player.set_rotation(0.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TILE_SIZE;
    use crate::world::grid::Cell;

    fn six() -> Vec<GridMap> {
        (0..LEVEL_COUNT)
            .map(|i| {
                let mut g = GridMap::default();
                g.set(2, 2, if i % 2 == 0 { Cell::Wall } else { Cell::Exit });
                g
            })
            .collect()
    }

    #[test]
    fn needs_exactly_six_levels() {
        let mut levels = six();
        levels.pop();
        assert_eq!(
            LevelManager::new(levels).unwrap_err(),
            LevelError::WrongCount(LEVEL_COUNT - 1)
        );
    }

    #[test]
    fn advance_wraps() {
        let mut lm = LevelManager::new(six()).unwrap();
        for _ in 0..LEVEL_COUNT - 1 {
            lm.advance();
        }
        assert_eq!(lm.current(), LEVEL_COUNT - 1);
        lm.advance();
        assert_eq!(lm.current(), 0);
        assert_eq!(lm.level_number(), 1);
    }

    #[test]
    fn switch_exposes_that_grid() {
        let mut lm = LevelManager::new(six()).unwrap();
        let g = lm.switch_to(3).unwrap().clone();
        assert_eq!(g.cell(2, 2), Some(Cell::Exit));
        assert_eq!(lm.active(), &g);
        assert_eq!(lm.switch_to(6).unwrap_err(), LevelError::OutOfRange(6));
    }

    #[test]
    fn replace_swaps_whole_grid() {
        let mut lm = LevelManager::new(six()).unwrap();
        lm.replace(0, GridMap::bordered(5, 5)).unwrap();
        assert_eq!(lm.active().width(), 5);
        assert!(lm.replace(9, GridMap::default()).is_err());
    }

    #[test]
    fn player_starts_in_first_open_cell() {
        let world = World::new(LevelManager::new(six()).unwrap(), 60.0, 20.0).unwrap();
        assert_eq!(world.player.pos, GridMap::cell_center(1, 1));
        assert_eq!(world.player.pos.x, 1.5 * TILE_SIZE);
    }
}
