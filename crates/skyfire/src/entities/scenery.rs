//! Static scenery: the scrolling backdrop and solid terrain blocks

use spark_engine::entity::{Entity, EntityId, EntityKind, UpdateContext};
use spark_engine::foundation::math::Rect;
use spark_engine::render::{RenderFrame, SpriteParams, TextureHandle};

use super::{DEPTH_BACKDROP, DEPTH_SCENERY, KIND_SCENERY};
use crate::messages::GameMessage;

/// A static decoration or terrain block
pub struct Scenery {
    area: Rect,
    texture: TextureHandle,
    depth: f32,
    solid: bool,
}

impl Scenery {
    /// A solid block that shots collide with
    pub fn block(area: Rect, texture: TextureHandle) -> Self {
        Self {
            area,
            texture,
            depth: DEPTH_SCENERY,
            solid: true,
        }
    }

    /// A purely visual backdrop, painted below everything else
    pub fn backdrop(area: Rect, texture: TextureHandle) -> Self {
        Self {
            area,
            texture,
            depth: DEPTH_BACKDROP,
            solid: false,
        }
    }
}

impl Entity<GameMessage> for Scenery {
    fn update(&mut self, _id: EntityId, _ctx: &mut UpdateContext<'_, GameMessage>) {}

    fn render(&self, frame: &mut RenderFrame<'_>) {
        frame.draw_sprite(self.texture, &SpriteParams::at(self.area.origin));
    }

    fn rect(&self) -> Rect {
        if self.solid {
            self.area
        } else {
            Rect::EMPTY
        }
    }

    fn depth(&self) -> f32 {
        self.depth
    }

    fn kind(&self) -> EntityKind {
        KIND_SCENERY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_engine::foundation::math::{Point2, Vec2};

    #[test]
    fn test_backdrop_opts_out_of_collision() {
        let area = Rect::new(Point2::new(0.0, 0.0), Vec2::new(3072.0, 768.0));
        let backdrop = Scenery::backdrop(area, TextureHandle::new(1));
        assert!(backdrop.rect().is_empty());

        let block = Scenery::block(area, TextureHandle::new(1));
        assert_eq!(block.rect(), area);
    }
}
