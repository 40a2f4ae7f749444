//! RUNGUN: a side-scrolling run-and-gun platformer
//!
//! The simulation core lives in `game` and runs headless; this binary wires
//! it to macroquad for windowing, input, rendering and audio. Per frame:
//! poll input, step the world, feed the raised events to audio, then draw
//! the world and the health overlay.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod audio;
mod game;
mod input;
mod level;
mod overlay;
mod render;
mod settings;

use std::path::Path;

use macroquad::prelude::*;

use game::{GameWorld, SimStatus};
use settings::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RUNGUN v{}", VERSION),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let level = match level::load_level(Path::new("assets/levels/level1.ron")) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Failed to load level: {}", e);
            return;
        }
    };
    println!(
        "Loaded level: {} tiles, {} platforms, {} spawns",
        level.tiles.len(),
        level.platforms.len(),
        level.spawns.len()
    );

    let assets = match assets::load_assets(&level) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Failed to load assets: {}", e);
            return;
        }
    };

    let audio = audio::AudioBank::load().await;
    audio.start_music();

    let mut world = GameWorld::new(&level, assets.catalog.clone());
    let renderer = render::Renderer::new(&level, &world, &assets);

    let mut game_over = false;
    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if game_over {
            clear_background(BLACK);
            draw_banner("GAME OVER", "press Enter to quit");
            if is_key_pressed(KeyCode::Enter) {
                break;
            }
        } else {
            let dt = get_frame_time();
            let snapshot = input::poll();
            let status = world.step(dt, &snapshot);

            audio.react(world.events());
            renderer.draw(&world, &assets);
            overlay::draw_health(world.player_health(), &assets.health_icon);

            if status == SimStatus::GameOver {
                game_over = true;
            }
        }

        next_frame().await;
    }
}

fn draw_banner(title: &str, hint: &str) {
    let center_x = WINDOW_WIDTH as f32 / 2.0;
    let center_y = WINDOW_HEIGHT as f32 / 2.0;

    let title_dims = measure_text(title, None, 96, 1.0);
    draw_text(
        title,
        center_x - title_dims.width / 2.0,
        center_y,
        96.0,
        WHITE,
    );

    let hint_dims = measure_text(hint, None, 32, 1.0);
    draw_text(
        hint,
        center_x - hint_dims.width / 2.0,
        center_y + 60.0,
        32.0,
        GRAY,
    );
}
