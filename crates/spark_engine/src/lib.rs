//! # Spark Engine
//!
//! A small 2D game-loop core for scrolling action games.
//!
//! The engine owns the pieces that every real-time interactive application
//! ends up needing:
//!
//! - **Entity lifecycle**: a generational arena of entities partitioned into
//!   buckets, with reference-counted ownership and locked update/render/
//!   collision passes ([`entity::EntityManager`])
//! - **Deferred messages**: a FIFO queue of by-value commands applied between
//!   passes, so entities never mutate the world mid-traversal
//!   ([`message::MessageManager`])
//! - **Frame timing**: a clamped wall clock and a fixed-step accumulator for
//!   deterministic simulation stepping ([`foundation::time`])
//! - **Depth-sorted rendering** through a pluggable draw backend
//!   ([`render::DrawBackend`])
//!
//! The platform layer (windowing, GPU device, audio output) is out of scope;
//! it plugs in behind the [`render::DrawBackend`], [`render::ResourceLoader`],
//! and [`input::InputState`] traits.
//!
//! ## Quick Start
//!
//! ```
//! use spark_engine::prelude::*;
//!
//! struct Dot;
//!
//! impl Entity<()> for Dot {
//!     fn update(&mut self, _id: EntityId, _ctx: &mut UpdateContext<'_, ()>) {}
//!     fn render(&self, _frame: &mut RenderFrame<'_>) {}
//!     fn rect(&self) -> Rect { Rect::EMPTY }
//!     fn depth(&self) -> f32 { 0.0 }
//! }
//!
//! let mut world: EntityManager<()> = EntityManager::new();
//! let id = world.insert(Box::new(Dot));
//! world.add_to_bucket(id, 0);
//! world.release(id);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod entity;
pub mod events;
pub mod foundation;
pub mod input;
pub mod message;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        entity::{Entity, EntityId, EntityManager, UpdateContext},
        events::{EventBus, EventHandler},
        foundation::{
            math::{Point2, Rect, Vec2},
            time::{FixedTimestep, FrameClock},
        },
        input::{InputState, KeyCode, ScriptedInput},
        message::{MessageManager, MessageQueue},
        render::{
            DrawBackend, HeadlessBackend, RenderFrame, ResourceLoader, SpriteParams,
            TextureHandle,
        },
    };
}
