//! Impact puff effect
//!
//! A short non-looping sprite-sheet animation that drifts slightly from the
//! impact point and removes itself when the timeline finishes.

use rand::Rng;
use spark_engine::entity::{Entity, EntityId, EntityKind, UpdateContext};
use spark_engine::foundation::math::{Point2, Rect, Vec2};
use spark_engine::render::{AnimationFrame, RenderFrame, SpriteAnimation, SpriteParams, TextureHandle};

use super::{DEPTH_PUFF, KIND_PUFF};
use crate::messages::GameMessage;

const FRAME_SIZE: f32 = 32.0;
const FRAME_COUNT: usize = 4;
const FRAME_DURATION: f32 = 0.06;
const MAX_DRIFT: f32 = 12.0;

/// A one-shot impact animation
pub struct Puff {
    position: Point2,
    drift: Vec2,
    animation: SpriteAnimation,
}

impl Puff {
    /// Create a puff at `position` with a small random drift
    pub fn new(position: Point2, texture: TextureHandle) -> Self {
        let mut rng = rand::thread_rng();
        let frames = (0..FRAME_COUNT)
            .map(|i| AnimationFrame {
                source: Rect::new(
                    Point2::new(i as f32 * FRAME_SIZE, 0.0),
                    Vec2::new(FRAME_SIZE, FRAME_SIZE),
                ),
                duration: FRAME_DURATION,
            })
            .collect();
        Self {
            position,
            drift: Vec2::new(
                rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
                rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            ),
            animation: SpriteAnimation::new(texture, frames, false),
        }
    }
}

impl Entity<GameMessage> for Puff {
    fn update(&mut self, id: EntityId, ctx: &mut UpdateContext<'_, GameMessage>) {
        self.animation.update(ctx.elapsed);
        self.position += self.drift * ctx.elapsed;
        if self.animation.is_finished() {
            ctx.messages.queue(GameMessage::Destroy(id));
        }
    }

    fn render(&self, frame: &mut RenderFrame<'_>) {
        let origin = self.position - Vec2::new(FRAME_SIZE, FRAME_SIZE) / 2.0;
        let params = self.animation.apply_to(SpriteParams::at(origin));
        frame.draw_sprite(self.animation.texture(), &params);
    }

    // Effects have no physical footprint.
    fn rect(&self) -> Rect {
        Rect::EMPTY
    }

    fn depth(&self) -> f32 {
        DEPTH_PUFF
    }

    fn kind(&self) -> EntityKind {
        KIND_PUFF
    }
}
