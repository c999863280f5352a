//! # Skyfire
//!
//! A small scrolling shooter built on Spark Engine. The crate wires the
//! engine's bucketed entity world, deferred message dispatch, and fixed-step
//! timing into an actual game: a player ship, shots, terrain, and impact
//! effects, scrolled by a player-following camera.

pub mod buckets;
pub mod config;
pub mod entities;
pub mod game;
pub mod messages;
pub mod state;

pub use buckets::Bucket;
pub use config::GameConfig;
pub use game::Game;
pub use messages::{GameMessage, ShotKind};
pub use state::{GameState, PlayState, SessionStats, StateTransition};
