//! Headless demo run
//!
//! Drives a scripted play session against the recording backend: the ship
//! accelerates rightwards and fires periodically, and the session tallies
//! are logged at the end. Swap in a real windowing backend to play it.

use skyfire::config::GameConfig;
use skyfire::game::Game;
use skyfire::state::PlayState;
use spark_engine::config::Config;
use spark_engine::input::{KeyCode, ScriptedInput};
use spark_engine::render::HeadlessBackend;

const DEMO_FRAMES: u32 = 600;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let config = match GameConfig::load_or_default("skyfire.toml") {
        Ok(config) => config,
        Err(err) => {
            log::error!("failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    let mut game = Game::new(
        HeadlessBackend::new(),
        ScriptedInput::new(),
        PlayState::new(config),
    );

    game.input_mut().press(KeyCode::D);
    for frame in 0..DEMO_FRAMES {
        if frame % 48 == 0 {
            game.input_mut().press(KeyCode::Space);
        }
        if !game.advance(FRAME_TIME) {
            break;
        }
        game.input_mut().advance_frame();
        game.input_mut().release(KeyCode::Space);
    }

    let stats = game.state().stats();
    log::info!(
        "session over: {} shots fired, {} impacts",
        stats.shots_fired,
        stats.impacts
    );
    game.shutdown();
}
