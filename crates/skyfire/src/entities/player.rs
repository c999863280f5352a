//! The player ship
//!
//! Movement runs on a fixed physics step: frames that do not cross the step
//! threshold leave the ship untouched, and frames that do always integrate
//! with the same constant step.

use spark_engine::entity::{Entity, EntityId, EntityKind, UpdateContext};
use spark_engine::foundation::math::{Point2, Rect, Vec2};
use spark_engine::foundation::time::FixedTimestep;
use spark_engine::input::KeyCode;
use spark_engine::message::MessageQueue;
use spark_engine::render::{RenderFrame, SpriteParams, TextureHandle};

use super::{DEPTH_PLAYER, KIND_PLAYER};
use crate::config::PlayerConfig;
use crate::messages::{GameMessage, ShotKind};

/// The player-controlled ship
pub struct Player {
    position: Point2,
    speed: Vec2,
    size: Vec2,
    acceleration: f32,
    max_speed: f32,
    stepper: FixedTimestep,
    texture: TextureHandle,
}

impl Player {
    /// Create the ship at `position`
    pub fn new(config: &PlayerConfig, position: Point2, texture: TextureHandle) -> Self {
        Self {
            position,
            speed: Vec2::new(0.0, 0.0),
            size: Vec2::new(config.size, config.size),
            acceleration: config.acceleration,
            max_speed: config.max_speed,
            stepper: FixedTimestep::new(config.physics_timestep),
            texture,
        }
    }

    /// Center of the ship in world coordinates
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Current velocity in world units per second
    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    fn steer(&mut self, ctx: &UpdateContext<'_, GameMessage>, step: f32) {
        let thrust = self.acceleration * step;
        if ctx.input.is_key_down(KeyCode::A) || ctx.input.is_key_down(KeyCode::Left) {
            self.speed.x -= thrust;
        }
        if ctx.input.is_key_down(KeyCode::D) || ctx.input.is_key_down(KeyCode::Right) {
            self.speed.x += thrust;
        }
        if ctx.input.is_key_down(KeyCode::W) || ctx.input.is_key_down(KeyCode::Up) {
            self.speed.y -= thrust;
        }
        if ctx.input.is_key_down(KeyCode::S) || ctx.input.is_key_down(KeyCode::Down) {
            self.speed.y += thrust;
        }
        self.speed.x = self.speed.x.clamp(-self.max_speed, self.max_speed);
        self.speed.y = self.speed.y.clamp(-self.max_speed, self.max_speed);
    }

    /// Clamp the ship inside `bounds`. Hitting a wall kills the speed on
    /// that axis.
    fn stay_in_world(&mut self, bounds: Rect) {
        let half = self.size / 2.0;
        let clamped_x = self
            .position
            .x
            .clamp(bounds.left() + half.x, bounds.right() - half.x);
        if (clamped_x - self.position.x).abs() > f32::EPSILON {
            self.speed.x = 0.0;
        }
        let clamped_y = self
            .position
            .y
            .clamp(bounds.top() + half.y, bounds.bottom() - half.y);
        if (clamped_y - self.position.y).abs() > f32::EPSILON {
            self.speed.y = 0.0;
        }
        self.position = Point2::new(clamped_x, clamped_y);
    }

    fn fire(&self, ctx: &mut UpdateContext<'_, GameMessage>) {
        let muzzle = Point2::new(self.position.x + self.size.x / 2.0, self.position.y);
        if ctx.input.is_key_pressed(KeyCode::Space) {
            ctx.messages.queue(GameMessage::SpawnShot {
                position: muzzle,
                angle: 0.0,
                kind: ShotKind::Standard,
            });
        }
        if ctx.input.is_key_pressed(KeyCode::Enter) {
            ctx.messages.queue(GameMessage::SpawnShot {
                position: muzzle,
                angle: 0.0,
                kind: ShotKind::Heavy,
            });
        }
    }
}

impl Entity<GameMessage> for Player {
    fn update(&mut self, _id: EntityId, ctx: &mut UpdateContext<'_, GameMessage>) {
        let Some(step) = self.stepper.tick(ctx.elapsed) else {
            return;
        };
        self.steer(ctx, step);
        self.fire(ctx);
        self.position += self.speed * step;
        self.stay_in_world(ctx.world_bounds);
    }

    fn render(&self, frame: &mut RenderFrame<'_>) {
        frame.draw_sprite(self.texture, &SpriteParams::at(self.rect().origin));
    }

    fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    fn depth(&self) -> f32 {
        DEPTH_PLAYER
    }

    fn kind(&self) -> EntityKind {
        KIND_PLAYER
    }

    fn handle_collision(
        &mut self,
        _id: EntityId,
        _other: &dyn Entity<GameMessage>,
        _messages: &mut MessageQueue<GameMessage>,
    ) {
        // Terrain contact is handled by the wall clamp; shots are friendly.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_engine::input::ScriptedInput;
    use spark_engine::render::TextureHandle;

    fn bounds() -> Rect {
        Rect::new(Point2::new(0.0, 0.0), Vec2::new(3072.0, 768.0))
    }

    fn run_frame(
        player: &mut Player,
        input: &ScriptedInput,
        elapsed: f32,
    ) -> MessageQueue<GameMessage> {
        let mut messages = MessageQueue::new();
        let mut ctx = UpdateContext {
            elapsed,
            input,
            world_bounds: bounds(),
            messages: &mut messages,
        };
        player.update(EntityId::default(), &mut ctx);
        messages
    }

    #[test]
    fn test_held_key_accelerates_rightwards() {
        let config = PlayerConfig::default();
        let mut player = Player::new(&config, Point2::new(400.0, 400.0), TextureHandle::new(1));
        let mut input = ScriptedInput::new();
        input.press(KeyCode::D);

        let start = player.position();
        run_frame(&mut player, &input, config.physics_timestep);
        assert!(player.position().x > start.x);
        assert!(player.speed().x > 0.0);
        assert_eq!(player.speed().y, 0.0);
    }

    #[test]
    fn test_sub_step_frame_is_skipped() {
        let config = PlayerConfig::default();
        let mut player = Player::new(&config, Point2::new(400.0, 400.0), TextureHandle::new(1));
        let mut input = ScriptedInput::new();
        input.press(KeyCode::D);

        let start = player.position();
        run_frame(&mut player, &input, config.physics_timestep * 0.25);
        assert_eq!(player.position(), start);
        // The remainder carries over: the next frame crosses the threshold.
        run_frame(&mut player, &input, config.physics_timestep * 0.8);
        assert!(player.position().x > start.x);
    }

    #[test]
    fn test_wall_contact_zeroes_speed() {
        let config = PlayerConfig::default();
        let mut player = Player::new(
            &config,
            Point2::new(config.size / 2.0 + 1.0, 400.0),
            TextureHandle::new(1),
        );
        let mut input = ScriptedInput::new();
        input.press(KeyCode::A);

        for _ in 0..30 {
            run_frame(&mut player, &input, config.physics_timestep);
        }
        assert_eq!(player.speed().x, 0.0);
        assert_eq!(player.rect().left(), 0.0);
    }

    #[test]
    fn test_fire_keys_queue_shots_on_the_press_edge() {
        let config = PlayerConfig::default();
        let mut player = Player::new(&config, Point2::new(400.0, 400.0), TextureHandle::new(1));
        let mut input = ScriptedInput::new();
        input.press(KeyCode::Space);

        let messages = run_frame(&mut player, &input, config.physics_timestep);
        assert_eq!(messages.len(), 1);

        // Holding the key does not re-fire.
        input.advance_frame();
        let messages = run_frame(&mut player, &input, config.physics_timestep);
        assert!(messages.is_empty());
    }
}
