use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use super::{
    input::InputCmd,
    mob::{self, SpawnError},
    systems,
};
use crate::{
    config::TILE_SIZE,
    world::{
        level::{LevelError, World},
        texture::TextureId,
    },
};

/// Frame interval the main loop aims for (≈60 Hz).
pub const FRAME_TARGET: Duration = Duration::from_millis(16);
/// Longest step a single frame may simulate, so a stall does not tunnel
/// bodies through walls.
pub const MAX_DT: f32 = 0.1;

/// Wall-clock delta between frames.
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call, capped at [`MAX_DT`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_DT)
    }
}

/// What happened during one [`Sim::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The player walked onto an exit; carries the new 1-based level number.
    LevelChanged(usize),
}

/// Drives the per-frame systems over a [`World`].
pub struct Sim {
    rng: StdRng,
    enemy_tex: TextureId,
}

impl Sim {
    pub fn new(seed: u64, enemy_tex: TextureId) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            enemy_tex,
        }
    }

    /// Reset the player and repopulate enemies for the active level.
    ///
    /// A level with too few spawn markers gets one enemy per marker; the
    /// shortfall is logged. Returns the number of enemies spawned.
    pub fn start_level(&mut self, world: &mut World) -> Result<usize, LevelError> {
        world.reset_player()?;
        mob::despawn_enemies(&mut world.actors);

        let wanted = mob::enemy_count(world.levels.level_number());
        let cells = match mob::plan_spawns(world.grid(), wanted, &mut self.rng) {
            Ok(cells) => cells,
            Err(err @ SpawnError::NotEnoughSpawnPoints { available, .. }) => {
                warn!(level = world.levels.level_number(), "{err}");
                // cannot fail: asks for exactly what is there
                mob::plan_spawns(world.grid(), available, &mut self.rng).unwrap_or_default()
            }
        };

        for cell in &cells {
            mob::spawn_enemy(&mut world.actors, mob::enemy_rect(*cell, TILE_SIZE), self.enemy_tex);
        }
        info!(
            level = world.levels.level_number(),
            enemies = cells.len(),
            "level started"
        );
        Ok(cells.len())
    }

    /// Advance the world by `dt` seconds.
    pub fn step(&mut self, world: &mut World, cmd: &InputCmd, dt: f32) -> Result<StepOutcome, LevelError> {
        systems::player_movement(world, cmd, dt);
        systems::enemy_wander(&mut world.actors, world.levels.active(), dt);

        if systems::reached_exit(world.grid(), world.player.pos) {
            world.levels.advance();
            self.start_level(world)?;
            return Ok(StepOutcome::LevelChanged(world.levels.level_number()));
        }
        Ok(StepOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LEVEL_COUNT,
        sim::components::Enemy,
        world::{
            grid::{Cell, GridMap},
            level::LevelManager,
        },
    };

    fn levels(spawns: usize) -> Vec<GridMap> {
        (0..LEVEL_COUNT)
            .map(|_| {
                let mut g = GridMap::default();
                for i in 0..spawns {
                    g.set(2 + i % 15, 3 + i / 15, Cell::Spawn);
                }
                g.set(3, 1, Cell::Exit);
                g
            })
            .collect()
    }

    fn enemies(world: &World) -> usize {
        world.actors.query::<&Enemy>().iter().count()
    }

    #[test]
    fn start_level_spawns_four_per_level() {
        let mut world = World::new(LevelManager::new(levels(30)).unwrap(), 60.0, 20.0).unwrap();
        let mut sim = Sim::new(1, 0);
        assert_eq!(sim.start_level(&mut world).unwrap(), 4);
        world.levels.switch_to(2).unwrap();
        assert_eq!(sim.start_level(&mut world).unwrap(), 12);
        assert_eq!(enemies(&world), 12);
    }

    #[test]
    fn shortfall_spawns_what_is_available() {
        let mut world = World::new(LevelManager::new(levels(6)).unwrap(), 60.0, 20.0).unwrap();
        world.levels.switch_to(1).unwrap();
        let mut sim = Sim::new(1, 0);
        assert_eq!(sim.start_level(&mut world).unwrap(), 6);
    }

    #[test]
    fn walking_onto_exit_advances_level() {
        let mut world = World::new(LevelManager::new(levels(30)).unwrap(), 60.0, 20.0).unwrap();
        let mut sim = Sim::new(9, 0);
        sim.start_level(&mut world).unwrap();

        // start is (1,1) facing east; the exit sits at (3,1)
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        let mut outcome = StepOutcome::Continue;
        for _ in 0..20 {
            outcome = sim.step(&mut world, &cmd, 0.05).unwrap();
            if outcome != StepOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::LevelChanged(2));
        assert_eq!(world.levels.current(), 1);
        assert_eq!(world.player.pos, GridMap::cell_center(1, 1));
        assert_eq!(enemies(&world), 8);
    }

    #[test]
    fn clock_is_capped() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(1));
        let dt = clock.tick();
        assert!(dt > 0.0 && dt <= MAX_DT);
    }
}
