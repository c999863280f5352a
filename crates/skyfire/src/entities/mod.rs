//! Game entities
//!
//! Each entity implements [`spark_engine::entity::Entity`] over the game's
//! [`crate::messages::GameMessage`] type. Structural reactions (firing,
//! impact effects, self-destruction) go through the message queue.

pub mod player;
pub mod puff;
pub mod scenery;
pub mod shot;

pub use player::Player;
pub use puff::Puff;
pub use scenery::Scenery;
pub use shot::Shot;

use spark_engine::entity::EntityKind;

/// Kind tag for the player ship
pub const KIND_PLAYER: EntityKind = EntityKind(1);
/// Kind tag for shots
pub const KIND_SHOT: EntityKind = EntityKind(2);
/// Kind tag for impact puffs
pub const KIND_PUFF: EntityKind = EntityKind(3);
/// Kind tag for scenery blocks
pub const KIND_SCENERY: EntityKind = EntityKind(4);

/// Paint depth of the scrolling backdrop
pub const DEPTH_BACKDROP: f32 = 0.0;
/// Paint depth of terrain blocks
pub const DEPTH_SCENERY: f32 = 2.0;
/// Paint depth of shots
pub const DEPTH_SHOT: f32 = 5.0;
/// Paint depth of the player ship
pub const DEPTH_PLAYER: f32 = 6.0;
/// Paint depth of impact puffs (above everything they land on)
pub const DEPTH_PUFF: f32 = 8.0;
