//! Overhead level viewer.
//!
//! ```bash
//! cargo run --release --bin mazemania_rs -- worlds.txt [level]
//! ```
//!
//! Keys 1-6 switch level, Esc quits.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mazemania_rs::{
    assets::read_levels,
    config::{LEVEL_COUNT, TILE_SIZE},
    engine::minimap::{ENEMY_COLOR, Minimap, PLAYER_COLOR},
    renderer::{Renderer, Software},
    sim::mob::enemy_rect,
    world::{GridMap, LevelManager},
};

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Level file holding the six maps
    #[arg(value_name = "FILE", default_value = "worlds.txt")]
    levels: PathBuf,

    /// Level slot to show first (0-based)
    #[arg(default_value_t = 0)]
    level: usize,
}

const LEVEL_KEYS: [Key; LEVEL_COUNT] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6];

fn draw(renderer: &mut Software, grid: &GridMap, mm: &Minimap) {
    renderer.begin_frame(WIDTH, HEIGHT);
    mm.draw_tiles(renderer, grid);
    for cell in grid.spawn_points() {
        let r = enemy_rect(cell, TILE_SIZE);
        mm.draw_marker(renderer, r.center(), r.size.x, ENEMY_COLOR);
    }
    if let Some(start) = grid.start_cell() {
        mm.draw_marker(renderer, GridMap::cell_center(start.x, start.y), TILE_SIZE / 3.0, PLAYER_COLOR);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    // ─────────── load level set ───────
    let grids = read_levels(&opts.levels)
        .with_context(|| format!("reading {}", opts.levels.display()))?;
    let mut levels = LevelManager::new(grids)?;
    levels.switch_to(opts.level)?;

    // ─────────── map‑space → screen‑space scale ────────────
    let grid = levels.active();
    let map = grid.extent(TILE_SIZE);
    let scale = (WIDTH as f32 / map.x).min(HEIGHT as f32 / map.y);
    let mm = Minimap::new(scale, TILE_SIZE);

    let mut renderer = Software::default();
    draw(&mut renderer, levels.active(), &mm);

    // ─────────── show window ────────────
    let mut window = Window::new("MazeMania levels", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(30);
    while window.is_open() && !window.is_key_down(Key::Escape) {
        if let Some(idx) = LEVEL_KEYS
            .iter()
            .position(|&k| window.is_key_pressed(k, KeyRepeat::No))
        {
            let grid = levels.switch_to(idx)?;
            info!(
                level = idx + 1,
                spawns = grid.spawn_points().len(),
                enclosed = grid.is_enclosed(),
                "showing level"
            );
            draw(&mut renderer, levels.active(), &mm);
        }
        renderer.present(|fb, w, h| window.update_with_buffer(fb, w, h))?;
    }
    Ok(())
}
