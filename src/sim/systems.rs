use glam::Vec2;

use super::{
    collision::{MoveResult, try_move},
    components::{Body, Heading, Speed},
    input::InputCmd,
};
use crate::{
    config::{PLAYER_SPEED, TILE_SIZE, TURN_RATE},
    world::{
        geometry::{Rect, dir_from_deg, normalize_deg},
        grid::{Cell, GridMap},
        level::World,
    },
};

/// Degrees an enemy turns after bumping into a wall.
pub const WANDER_TURN: f32 = 90.0;

/* ── Player ───────────────────────────────────────────────────────── */

/// Turn, then move relative to the new facing; blocked axes are reverted.
pub fn player_movement(world: &mut World, cmd: &InputCmd, dt: f32) -> MoveResult {
    if cmd.turn != 0.0 {
        world.player.turn(cmd.turn * TURN_RATE * dt);
    }

    let delta = world.player.step_delta(cmd.forward, cmd.strafe) * PLAYER_SPEED * dt;
    if delta == Vec2::ZERO {
        return MoveResult::default();
    }

    let size = world.player_size;
    let mut body = Rect::new(0.0, 0.0, size, size).centered_at(world.player.pos);
    let res = try_move(world.grid(), &mut body, delta, TILE_SIZE);
    world.player.pos = body.center();
    res
}

/// True when the cell under `pos` is an exit.
pub fn reached_exit(grid: &GridMap, pos: Vec2) -> bool {
    let c = GridMap::world_to_cell(pos, TILE_SIZE);
    grid.cell(c.x, c.y) == Some(Cell::Exit)
}

/* ── Enemies ──────────────────────────────────────────────────────── */

/// Walk every enemy along its heading; turn 90° on collision.
pub fn enemy_wander(actors: &mut hecs::World, grid: &GridMap, dt: f32) {
    for (_, (body, speed, heading)) in actors.query_mut::<(&mut Body, &Speed, &mut Heading)>() {
        let delta = dir_from_deg(heading.0) * speed.0 * dt;
        if try_move(grid, &mut body.0, delta, TILE_SIZE).hit_wall() {
            heading.0 = normalize_deg(heading.0 + WANDER_TURN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LEVEL_COUNT,
        sim::mob::{enemy_rect, spawn_enemy},
        world::level::LevelManager,
    };
    use glam::IVec2;

    fn world() -> World {
        let levels = LevelManager::new(vec![GridMap::default(); LEVEL_COUNT]).unwrap();
        let mut w = World::new(levels, 60.0, TILE_SIZE / 3.0).unwrap();
        w.player.pos = GridMap::cell_center(5, 5);
        w
    }

    #[test]
    fn forward_follows_facing() {
        let mut w = world();
        w.player.set_rotation(90.0);
        let start = w.player.pos;
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        let res = player_movement(&mut w, &cmd, 0.1);
        assert!(!res.hit_wall());
        // facing +y: 200 px/s · 0.1 s downward
        assert!((w.player.pos - (start + Vec2::new(0.0, 20.0))).length() < 1e-3);
    }

    #[test]
    fn strafe_right_is_clockwise_of_facing() {
        let mut w = world();
        let start = w.player.pos;
        let cmd = InputCmd {
            strafe: 1.0,
            ..InputCmd::default()
        };
        player_movement(&mut w, &cmd, 0.05);
        // facing east, right is +y
        assert!(w.player.pos.y > start.y);
        assert!((w.player.pos.x - start.x).abs() < 1e-3);
    }

    #[test]
    fn turning_scales_with_dt() {
        let mut w = world();
        let cmd = InputCmd {
            turn: -1.0,
            ..InputCmd::default()
        };
        player_movement(&mut w, &cmd, 0.5);
        assert!((w.player.rotation() - 315.0).abs() < 1e-3);
    }

    #[test]
    fn player_stops_at_boundary() {
        let mut w = world();
        w.player.pos = GridMap::cell_center(1, 5);
        w.player.set_rotation(180.0);
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        let res = player_movement(&mut w, &cmd, 0.5);
        assert!(res.blocked_x);
        assert!((w.player.pos - GridMap::cell_center(1, 5)).length() < 1e-3);
    }

    #[test]
    fn exit_detection_uses_player_cell() {
        let mut g = GridMap::default();
        g.set(4, 4, Cell::Exit);
        assert!(reached_exit(&g, GridMap::cell_center(4, 4)));
        assert!(!reached_exit(&g, GridMap::cell_center(5, 4)));
    }

    #[test]
    fn enemies_turn_on_collision() {
        let g = GridMap::default();
        let mut actors = hecs::World::new();
        // one step short of the east boundary, heading east
        let e = spawn_enemy(&mut actors, enemy_rect(IVec2::new(19, 5), TILE_SIZE), 0);
        let before = actors.get::<&Body>(e).unwrap().0;

        enemy_wander(&mut actors, &g, 0.5);
        assert_eq!(actors.get::<&Heading>(e).unwrap().0, 90.0);
        assert_eq!(actors.get::<&Body>(e).unwrap().0, before);

        enemy_wander(&mut actors, &g, 0.1);
        let after = actors.get::<&Body>(e).unwrap().0;
        assert!((after.pos.y - before.pos.y - 10.0).abs() < 1e-3);
    }
}
