//! Player-fired projectiles

use nalgebra::Rotation2;
use spark_engine::entity::{Entity, EntityId, EntityKind, UpdateContext};
use spark_engine::foundation::math::{Point2, Rect, Vec2};
use spark_engine::message::MessageQueue;
use spark_engine::render::{RenderFrame, SpriteParams, TextureHandle};

use super::{DEPTH_SHOT, KIND_SCENERY, KIND_SHOT};
use crate::config::ShotConfig;
use crate::messages::{GameMessage, ShotKind};

/// A projectile travelling in a straight line until it leaves the playfield
/// or hits something solid
pub struct Shot {
    position: Point2,
    velocity: Vec2,
    size: Vec2,
    texture: TextureHandle,
}

impl Shot {
    /// Create a shot at `position` travelling along `angle` (radians,
    /// 0 = rightwards)
    pub fn new(
        config: &ShotConfig,
        kind: ShotKind,
        position: Point2,
        angle: f32,
        texture: TextureHandle,
    ) -> Self {
        let (speed, size) = match kind {
            ShotKind::Standard => (config.standard_speed, config.standard_size),
            ShotKind::Heavy => (config.heavy_speed, config.heavy_size),
        };
        Self {
            position,
            velocity: Rotation2::new(angle) * Vec2::new(speed, 0.0),
            size: Vec2::new(size, size),
            texture,
        }
    }

    /// Center of the shot in world coordinates
    pub fn position(&self) -> Point2 {
        self.position
    }
}

impl Entity<GameMessage> for Shot {
    fn update(&mut self, id: EntityId, ctx: &mut UpdateContext<'_, GameMessage>) {
        self.position += self.velocity * ctx.elapsed;
        if !self.rect().intersects(&ctx.world_bounds) {
            ctx.messages.queue(GameMessage::Destroy(id));
        }
    }

    fn render(&self, frame: &mut RenderFrame<'_>) {
        frame.draw_sprite(self.texture, &SpriteParams::at(self.rect().origin));
    }

    fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    fn depth(&self) -> f32 {
        DEPTH_SHOT
    }

    fn kind(&self) -> EntityKind {
        KIND_SHOT
    }

    fn handle_collision(
        &mut self,
        id: EntityId,
        other: &dyn Entity<GameMessage>,
        messages: &mut MessageQueue<GameMessage>,
    ) {
        if other.kind() == KIND_SCENERY {
            messages.queue(GameMessage::SpawnPuff {
                position: self.position,
            });
            messages.queue(GameMessage::Destroy(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Scenery;
    use spark_engine::input::ScriptedInput;

    fn run_frame(shot: &mut Shot, elapsed: f32, bounds: Rect) -> MessageQueue<GameMessage> {
        let input = ScriptedInput::new();
        let mut messages = MessageQueue::new();
        let mut ctx = UpdateContext {
            elapsed,
            input: &input,
            world_bounds: bounds,
            messages: &mut messages,
        };
        shot.update(EntityId::default(), &mut ctx);
        messages
    }

    #[test]
    fn test_shot_travels_along_its_angle() {
        let config = ShotConfig::default();
        let mut shot = Shot::new(
            &config,
            ShotKind::Standard,
            Point2::new(100.0, 100.0),
            0.0,
            TextureHandle::new(1),
        );
        let bounds = Rect::new(Point2::new(0.0, 0.0), Vec2::new(3072.0, 768.0));
        run_frame(&mut shot, 0.5, bounds);
        assert_eq!(shot.position().x, 100.0 + config.standard_speed * 0.5);
        assert_eq!(shot.position().y, 100.0);
    }

    #[test]
    fn test_offscreen_shot_requests_its_own_destruction() {
        let config = ShotConfig::default();
        let mut shot = Shot::new(
            &config,
            ShotKind::Standard,
            Point2::new(3070.0, 100.0),
            0.0,
            TextureHandle::new(1),
        );
        let bounds = Rect::new(Point2::new(0.0, 0.0), Vec2::new(3072.0, 768.0));
        let messages = run_frame(&mut shot, 0.5, bounds);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_scenery_impact_spawns_puff_and_destroys_shot() {
        let config = ShotConfig::default();
        let mut shot = Shot::new(
            &config,
            ShotKind::Heavy,
            Point2::new(100.0, 100.0),
            0.0,
            TextureHandle::new(1),
        );
        let rock = Scenery::block(
            Rect::new(Point2::new(90.0, 90.0), Vec2::new(64.0, 64.0)),
            TextureHandle::new(2),
        );
        let mut messages = MessageQueue::new();
        shot.handle_collision(EntityId::default(), &rock, &mut messages);
        assert_eq!(messages.len(), 2);
    }
}
