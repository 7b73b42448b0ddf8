//! First-person maze game.
//!
//! ```bash
//! cargo run --release -- --levels worlds.txt --assets assets
//! ```
//!
//! Arrows move and strafe, A/D turn, M toggles the minimap, Esc quits.

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mazemania_rs::{
    assets::{load_surfaces, load_world},
    config::Settings,
    engine::Engine,
    renderer::Software,
    sim::{Action, FRAME_TARGET, FrameClock, InputState, Sim, StepOutcome},
    world::TextureBank,
};

fn key_action(key: Key) -> Option<Action> {
    Some(match key {
        Key::Up => Action::Forward,
        Key::Down => Action::Back,
        Key::Left => Action::StrafeLeft,
        Key::Right => Action::StrafeRight,
        Key::A => Action::TurnLeft,
        Key::D => Action::TurnRight,
        Key::M => Action::ToggleMinimap,
        _ => return None,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();

    let mut world = load_world(&settings)
        .with_context(|| format!("loading levels from {}", settings.levels.display()))?;

    let mut texture_bank = TextureBank::default_with_checker();
    let surfaces = load_surfaces(&settings.assets, &mut texture_bank)
        .with_context(|| format!("loading textures from {}", settings.assets.display()))?;
    info!("{} textures loaded", texture_bank.len() - 1);

    let mut sim = Sim::new(settings.seed, surfaces.enemy);
    sim.start_level(&mut world).context("starting first level")?;

    let mut engine = Engine::from_settings(Software::default(), &settings);

    let mut win = Window::new(
        "MazeMania",
        settings.width,
        settings.height,
        WindowOptions::default(),
    )
    .context("opening window")?;
    win.set_target_fps((1000 / FRAME_TARGET.as_millis()) as usize);

    let mut input = InputState::new();
    let mut clock = FrameClock::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* input: discrete down / up events ---------------------------------- */
        for key in win.get_keys_pressed(KeyRepeat::No) {
            if let Some(action) = key_action(key) {
                input.key_down(action);
            }
        }
        for key in win.get_keys_released() {
            if let Some(action) = key_action(key) {
                input.key_up(action);
            }
        }
        if input.take_minimap_toggle() {
            engine.toggle_minimap();
        }

        /* simulate ---------------------------------------------------------- */
        let dt = clock.tick();
        if let StepOutcome::LevelChanged(n) = sim.step(&mut world, &input.command(), dt)? {
            info!(level = n, "exit reached");
        }

        /* draw -------------------------------------------------------------- */
        let t0 = Instant::now();
        engine
            .render_frame(&world, &texture_bank, &surfaces, |fb, w, h| {
                acc_time += t0.elapsed();
                acc_frames += 1;
                win.update_with_buffer(fb, w, h)
            })
            .context("presenting frame")?;

        // ─────────── report every ~3 s ─────────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
