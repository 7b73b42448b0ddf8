//! gen_worlds.rs - one-shot CLI that writes a six-level `worlds.txt`.
//!
//! Every level starts from the built-in 21×12 layout; one exit cell and
//! `4 × level` spawn markers are then scattered over its open cells.
//!
//! USAGE:
//! ```bash
//! cargo run --bin gen_worlds -- --out worlds.txt --seed 7
//! ```

use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Parser;
use glam::IVec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mazemania_rs::{
    assets::write_levels,
    config::{LEVEL_COUNT, MAP_HEIGHT, MAP_WIDTH},
    sim::mob::enemy_count,
    world::{Cell, GridMap},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// File receiving the six maps
    #[arg(long, value_name = "FILE", default_value = "worlds.txt")]
    out: PathBuf,

    /// Seed for exit and spawn placement
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
}

/// The built-in layout: boundary ring, a few wall runs, open floor.
const BASE: [[u8; MAP_WIDTH]; MAP_HEIGHT] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 2, 2, 2, 2, 2, 0, 0, 0, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 1],
    [1, 0, 2, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 2, 2, 2, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

fn base_grid() -> anyhow::Result<GridMap> {
    let rows = BASE
        .iter()
        .map(|row| {
            row.iter()
                .map(|&code| Cell::from_code(code as i32).context("bad cell code in layout"))
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    GridMap::from_rows(rows).context("ragged layout")
}

/// One level: the base layout plus an exit and `4 × level_number` spawns.
///
/// The player start (first open cell) is never used, so it stays the
/// start after placement.
fn gen_level<G: Rng>(level_number: usize, rng: &mut G) -> anyhow::Result<GridMap> {
    let mut grid = base_grid()?;
    let start = grid.start_cell().context("layout has no open cell")?;

    let mut free: Vec<IVec2> = grid
        .iter()
        .filter(|&(_, _, c)| c == Cell::Open)
        .map(|(x, y, _)| IVec2::new(x as i32, y as i32))
        .filter(|&c| c != start)
        .collect();

    let spawns = enemy_count(level_number);
    ensure!(
        free.len() > spawns,
        "level {level_number}: {} open cells, need {}",
        free.len(),
        spawns + 1
    );

    let exit = free.remove(rng.gen_range(0..free.len()));
    grid.set(exit.x as usize, exit.y as usize, Cell::Exit);
    for _ in 0..spawns {
        let c = free.remove(rng.gen_range(0..free.len()));
        grid.set(c.x as usize, c.y as usize, Cell::Spawn);
    }
    Ok(grid)
}

fn gen_levels(seed: u64) -> anyhow::Result<Vec<GridMap>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=LEVEL_COUNT).map(|n| gen_level(n, &mut rng)).collect()
}

// ------------------------------------------------------------------
//  High-level entry point
// ------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let levels = gen_levels(opts.seed)?;
    write_levels(&opts.out, &levels)
        .with_context(|| format!("writing {}", opts.out.display()))?;
    info!(path = %opts.out.display(), seed = opts.seed, "wrote {} levels", levels.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazemania_rs::assets::read_levels;

    #[test]
    fn base_layout_is_enclosed_and_starts_top_left() {
        let g = base_grid().unwrap();
        assert!(g.is_enclosed());
        assert_eq!(g.start_cell(), Some(IVec2::new(1, 1)));
    }

    #[test]
    fn levels_carry_one_exit_and_scaled_spawns() {
        let levels = gen_levels(3).unwrap();
        assert_eq!(levels.len(), LEVEL_COUNT);
        for (i, g) in levels.iter().enumerate() {
            let exits = g.iter().filter(|&(_, _, c)| c == Cell::Exit).count();
            assert_eq!(exits, 1);
            assert_eq!(g.spawn_points().len(), enemy_count(i + 1));
            assert_eq!(g.start_cell(), Some(IVec2::new(1, 1)));
        }
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worlds.txt");
        let levels = gen_levels(11).unwrap();
        write_levels(&path, &levels).unwrap();
        assert_eq!(read_levels(&path).unwrap(), levels);
    }
}
