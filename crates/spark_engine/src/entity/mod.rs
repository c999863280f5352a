//! Entity abstraction and the bucketed entity manager
//!
//! An [`Entity`] is one unit of simulation: it updates, renders, owns a
//! bounding rectangle for collision, and carries a depth value for paint
//! ordering. Entities live in an [`EntityManager`] arena and are referred to
//! by stable [`EntityId`] handles.
//!
//! The central rule of the update loop: an entity must never add or remove
//! entities while a traversal is running. Structural edits are expressed as
//! messages queued through [`UpdateContext::messages`] and applied by the
//! game's message dispatch between passes.

mod manager;

pub use manager::{EntityId, EntityManager};

use crate::foundation::math::Rect;
use crate::input::InputState;
use crate::message::MessageQueue;
use crate::render::RenderFrame;

/// Game-assigned discriminant for an entity class.
///
/// Collision handlers receive the other participant as `&dyn Entity` and use
/// this to decide how to react, the way a dynamic type tag would be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKind(pub u16);

impl EntityKind {
    /// Kind reported by entities that never discriminate
    pub const UNTYPED: Self = Self(0);
}

/// Per-frame data handed to every entity update.
///
/// `M` is the game's message type; entities request structural changes by
/// queuing messages rather than touching the manager directly.
pub struct UpdateContext<'a, M> {
    /// Clamped elapsed wall time for this frame, in seconds
    pub elapsed: f32,
    /// Polled input state, valid for the duration of this frame
    pub input: &'a dyn InputState,
    /// Playfield bounds in world coordinates
    pub world_bounds: Rect,
    /// Queue for deferred structural edits
    pub messages: &'a mut MessageQueue<M>,
}

/// A simulated object owned by the [`EntityManager`].
///
/// `M` is the game's message type. Methods receive the entity's own id so a
/// reaction can name itself in a queued message (self-destruct being the
/// common case).
pub trait Entity<M> {
    /// Advance the entity by one frame
    fn update(&mut self, id: EntityId, ctx: &mut UpdateContext<'_, M>);

    /// Draw the entity. Called during the depth-sorted render pass.
    fn render(&self, frame: &mut RenderFrame<'_>);

    /// Bounding rectangle used by the collision pass.
    ///
    /// Return [`Rect::EMPTY`] to opt out of collision entirely.
    fn rect(&self) -> Rect;

    /// Render depth: entities with higher depth are painted later (on top)
    fn depth(&self) -> f32;

    /// Class discriminant, [`EntityKind::UNTYPED`] by default
    fn kind(&self) -> EntityKind {
        EntityKind::UNTYPED
    }

    /// React to an intersection with `other`.
    ///
    /// Only mutate `self`; the other participant receives its own callback
    /// for the same pair. Structural reactions (self-destruct, spawns) go
    /// through `messages`.
    fn handle_collision(&mut self, id: EntityId, other: &dyn Entity<M>, messages: &mut MessageQueue<M>) {
        let _ = (id, other, messages);
    }
}
