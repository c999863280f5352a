//! Game configuration
//!
//! Loaded from `skyfire.toml` next to the executable; every field has a
//! default so a missing or partial file still produces a playable setup.

use serde::{Deserialize, Serialize};
use spark_engine::config::Config;
use spark_engine::foundation::time::DEFAULT_STEP;

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window / view settings
    pub window: WindowConfig,
    /// Playfield settings
    pub world: WorldConfig,
    /// Player ship settings
    pub player: PlayerConfig,
    /// Shot settings
    pub shots: ShotConfig,
}

impl Config for GameConfig {}

/// Window and view dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// View width in world units
    pub width: f32,
    /// View height in world units
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Playfield dimensions. Wider than the window: the camera scrolls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Playfield width in world units
    pub width: f32,
    /// Playfield height in world units
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 3072.0,
            height: 768.0,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Acceleration in world units per second squared
    pub acceleration: f32,
    /// Per-axis speed cap in world units per second
    pub max_speed: f32,
    /// Hitbox edge length in world units
    pub size: f32,
    /// Physics time step in seconds
    pub physics_timestep: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            acceleration: 900.0,
            max_speed: 480.0,
            size: 48.0,
            physics_timestep: DEFAULT_STEP,
        }
    }
}

/// Shot tuning per [`crate::messages::ShotKind`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Standard shot speed in world units per second
    pub standard_speed: f32,
    /// Heavy shot speed in world units per second
    pub heavy_speed: f32,
    /// Standard shot hitbox edge length
    pub standard_size: f32,
    /// Heavy shot hitbox edge length
    pub heavy_size: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            standard_speed: 640.0,
            heavy_speed: 360.0,
            standard_size: 12.0,
            heavy_size: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("skyfire_config_missing.toml");
        let _ = std::fs::remove_file(&path);
        let config = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(config.world.width, WorldConfig::default().width);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let path = std::env::temp_dir().join("skyfire_config_partial.toml");
        std::fs::write(&path, "[player]\nacceleration = 1200.0\n").unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.player.acceleration, 1200.0);
        assert_eq!(config.player.max_speed, PlayerConfig::default().max_speed);
        assert_eq!(config.shots.standard_speed, ShotConfig::default().standard_speed);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip() {
        let path = std::env::temp_dir().join("skyfire_config_round_trip.toml");
        let mut config = GameConfig::default();
        config.shots.heavy_speed = 300.0;
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded.shots.heavy_speed, 300.0);
        let _ = std::fs::remove_file(&path);
    }
}
