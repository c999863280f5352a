//! Deferred game commands.
//!
//! Entities never spawn or remove other entities mid-pass; they queue one of
//! these and the play state's dispatcher applies it between passes.

use spark_engine::prelude::*;

/// Shot variants, differing in speed and hitbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    /// Fast, small projectile
    Standard,
    /// Slow, large projectile
    Heavy,
}

/// A structural change requested during a traversal pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameMessage {
    /// Spawn a shot travelling along `angle` (radians, 0 = rightwards)
    SpawnShot {
        /// World position of the muzzle
        position: Point2,
        /// Travel direction in radians
        angle: f32,
        /// Which shot variant to spawn
        kind: ShotKind,
    },
    /// Spawn an impact puff effect
    SpawnPuff {
        /// World position of the impact
        position: Point2,
    },
    /// Remove an entity from whatever bucket holds it.
    ///
    /// Tolerant of duplicates: an entity that queued its own destruction on
    /// several frames is removed once and the rest are quietly ignored.
    Destroy(EntityId),
}
