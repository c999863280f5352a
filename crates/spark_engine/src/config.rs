//! Configuration loading
//!
//! Any serde-derived settings struct gains file loading and saving by
//! implementing [`Config`]. TOML is the primary format; RON is accepted for
//! hand-edited development configs.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Configuration load/save errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents did not parse as the expected structure
    #[error("parse error: {0}")]
    Parse(String),

    /// The structure could not be serialized
    #[error("serialize error: {0}")]
    Serialize(String),

    /// The file extension names no supported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// File-backed configuration structure.
///
/// Format is chosen by extension: `.toml` or `.ron`.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load from a config file
    fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => {
                let contents = std::fs::read_to_string(path)?;
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load from a config file, falling back to defaults when the file is
    /// missing. Parse errors still fail: a broken file should be noticed,
    /// not silently replaced.
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("config {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save to a config file
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        speed: f32,
        lives: u32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                speed: 100.0,
                lives: 3,
            }
        }
    }

    impl Config for Sample {}

    #[test]
    fn test_toml_round_trip() {
        let path = std::env::temp_dir().join("spark_engine_config_test.toml");
        let sample = Sample {
            speed: 250.0,
            lives: 5,
        };
        sample.save(&path).unwrap();
        let loaded = Sample::load(&path).unwrap();
        assert_eq!(loaded, sample);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("spark_engine_config_missing.toml");
        let _ = std::fs::remove_file(&path);
        let loaded = Sample::load_or_default(&path).unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = Sample::load("settings.ini").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
