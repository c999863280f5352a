//! Top-level game loop
//!
//! Owns the platform backend, the input source, the frame clock, and the
//! active state. Each tick measures (or is handed) an elapsed time, clamps
//! it, updates the state, and renders.

use spark_engine::foundation::time::FrameClock;
use spark_engine::input::InputState;
use spark_engine::render::{DrawBackend, ResourceLoader};

use crate::state::{GameState, StateTransition};

/// The game loop driver
pub struct Game<B, I, S>
where
    B: DrawBackend + ResourceLoader,
    I: InputState,
    S: GameState,
{
    backend: B,
    input: I,
    clock: FrameClock,
    state: S,
}

impl<B, I, S> Game<B, I, S>
where
    B: DrawBackend + ResourceLoader,
    I: InputState,
    S: GameState,
{
    /// Create the loop and enter the initial state
    pub fn new(backend: B, input: I, state: S) -> Self {
        let mut game = Self {
            backend,
            input,
            clock: FrameClock::new(),
            state,
        };
        game.state.enter(&mut game.backend);
        game
    }

    /// Run one frame against the wall clock. Returns `false` when the state
    /// asked to quit.
    pub fn tick(&mut self) -> bool {
        let elapsed = self.clock.tick();
        self.frame(elapsed)
    }

    /// Run one frame with a caller-supplied elapsed time (headless and
    /// scripted runs). The same clamp applies as for wall-clock frames.
    pub fn advance(&mut self, elapsed: f32) -> bool {
        let elapsed = self.clock.clamp(elapsed);
        self.frame(elapsed)
    }

    fn frame(&mut self, elapsed: f32) -> bool {
        if self.state.update(elapsed, &self.input) == StateTransition::Quit {
            return false;
        }
        self.state.render(&mut self.backend);
        true
    }

    /// Run wall-clock frames until the state quits, then exit the state
    pub fn run(&mut self) {
        log::info!("game loop starting");
        while self.tick() {}
        self.shutdown();
    }

    /// Exit the active state and release its assets
    pub fn shutdown(&mut self) {
        self.state.exit(&mut self.backend);
        log::info!("game loop stopped");
    }

    /// The active state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The platform backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the input source, for scripted runs
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::PlayState;
    use spark_engine::input::{KeyCode, ScriptedInput};
    use spark_engine::render::HeadlessBackend;

    fn demo_game() -> Game<HeadlessBackend, ScriptedInput, PlayState> {
        Game::new(
            HeadlessBackend::new(),
            ScriptedInput::new(),
            PlayState::new(GameConfig::default()),
        )
    }

    #[test]
    fn test_advance_renders_a_frame() {
        let mut game = demo_game();
        assert!(game.advance(1.0 / 60.0));
        assert!(!game.backend().calls().is_empty());
    }

    #[test]
    fn test_escape_stops_the_loop() {
        let mut game = demo_game();
        assert!(game.advance(1.0 / 60.0));
        game.input_mut().press(KeyCode::Escape);
        assert!(!game.advance(1.0 / 60.0));
    }
}
