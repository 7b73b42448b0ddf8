use glam::IVec2;
use hecs::World;
use rand::Rng;
use thiserror::Error;

use super::components::{Body, Enemy, Heading, Health, Speed, Sprite};
use crate::world::{geometry::Rect, grid::GridMap, texture::TextureId};

pub const ENEMY_SPEED: f32 = 100.0;
pub const ENEMY_HEALTH: i32 = 100;
/// Enemies per level number.
pub const ENEMIES_PER_LEVEL: usize = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpawnError {
    #[error("not enough spawn points: need {needed}, level has {available}")]
    NotEnoughSpawnPoints { needed: usize, available: usize },
}

/// Enemy count for a 1-based level number.
#[inline]
pub fn enemy_count(level_number: usize) -> usize {
    ENEMIES_PER_LEVEL * level_number
}

/// Enemy footprint for a spawn cell: a third of a tile, offset a third of
/// a tile into the cell.
pub fn enemy_rect(cell: IVec2, tile: f32) -> Rect {
    let third = tile / 3.0;
    Rect::new(
        cell.x as f32 * tile + third,
        cell.y as f32 * tile + third,
        third,
        third,
    )
}

/// Pick `count` distinct spawn cells at random.
///
/// Each pick removes its cell from the pool, so no two enemies share a
/// marker.
pub fn plan_spawns<G: Rng + ?Sized>(
    grid: &GridMap,
    count: usize,
    rng: &mut G,
) -> Result<Vec<IVec2>, SpawnError> {
    let mut pool = grid.spawn_points();
    if count > pool.len() {
        return Err(SpawnError::NotEnoughSpawnPoints {
            needed: count,
            available: pool.len(),
        });
    }
    Ok((0..count)
        .map(|_| pool.remove(rng.gen_range(0..pool.len())))
        .collect())
}

/// Spawn one enemy and return its `Entity` handle.
pub fn spawn_enemy(world: &mut World, body: Rect, tex: TextureId) -> hecs::Entity {
    world.spawn((
        Enemy,
        Body(body),
        Speed(ENEMY_SPEED),
        Health(ENEMY_HEALTH),
        Heading(0.0),
        Sprite(tex),
    ))
}

/// Remove every enemy (level teardown).
pub fn despawn_enemies(world: &mut World) {
    let doomed: Vec<hecs::Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    for e in doomed {
        // entity came from this query, so it is alive
        let _ = world.despawn(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TILE_SIZE, world::grid::Cell};
    use rand::{SeedableRng, rngs::StdRng};

    fn grid_with_spawns(n: usize) -> GridMap {
        let mut g = GridMap::default();
        for i in 0..n {
            g.set(1 + i % 19, 1 + i / 19, Cell::Spawn);
        }
        g
    }

    #[test]
    fn plans_distinct_cells() {
        let g = grid_with_spawns(10);
        let mut rng = StdRng::seed_from_u64(7);
        let cells = plan_spawns(&g, 8, &mut rng).unwrap();
        assert_eq!(cells.len(), 8);
        let mut dedup = cells.clone();
        dedup.sort_by_key(|c| (c.y, c.x));
        dedup.dedup();
        assert_eq!(dedup.len(), 8);
        assert!(cells.iter().all(|c| g.cell(c.x, c.y) == Some(Cell::Spawn)));
    }

    #[test]
    fn same_seed_same_plan() {
        let g = grid_with_spawns(12);
        let a = plan_spawns(&g, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = plan_spawns(&g, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shortfall_is_an_error() {
        let g = grid_with_spawns(3);
        let err = plan_spawns(&g, enemy_count(1), &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            SpawnError::NotEnoughSpawnPoints {
                needed: 4,
                available: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "not enough spawn points: need 4, level has 3"
        );
    }

    #[test]
    fn enemy_footprint_and_components() {
        let r = enemy_rect(IVec2::new(2, 3), TILE_SIZE);
        assert_eq!(r, Rect::new(140.0, 200.0, 20.0, 20.0));

        let mut world = World::new();
        let e = spawn_enemy(&mut world, r, 5);
        assert_eq!(world.get::<&Speed>(e).unwrap().0, ENEMY_SPEED);
        assert_eq!(world.get::<&Health>(e).unwrap().0, ENEMY_HEALTH);
        assert_eq!(world.get::<&Heading>(e).unwrap().0, 0.0);
        assert_eq!(world.get::<&Sprite>(e).unwrap().0, 5);

        despawn_enemies(&mut world);
        assert_eq!(world.len(), 0);
    }
}
