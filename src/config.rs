//! Configuration for the checklist tracker.

use crate::error::{DutyError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyConfig {
    /// Checklist store settings.
    pub store: StoreConfig,
    /// Profile and task photo upload settings.
    pub photo: PhotoConfig,
    /// Log filtering.
    pub logging: LoggingConfig,
}

/// Checklist store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snapshot file (None = `duty_dirs::store_file()`).
    pub snapshot_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured snapshot path or the platform default.
    #[must_use]
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(crate::duty_dirs::store_file)
    }
}

/// Resize-before-upload settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Longest side in pixels after resizing. Smaller photos are left as is.
    pub max_dimension: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_dimension: 800,
            jpeg_quality: 80,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dutyboard=info".to_owned(),
        }
    }
}

impl DutyConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DutyError::Config(e.to_string()))
    }

    /// Load from `path` when it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| DutyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file path (`duty_dirs::config_file()`).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        crate::duty_dirs::config_file()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = DutyConfig::default();
        assert_eq!(config.photo.max_dimension, 800);
        assert!(config.photo.jpeg_quality > 0 && config.photo.jpeg_quality <= 100);
        assert!(config.store.snapshot_path.is_none());
        assert_eq!(config.logging.filter, "dutyboard=info");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: DutyConfig = toml::from_str("[photo]\nmax_dimension = 1024\n").unwrap();
        assert_eq!(config.photo.max_dimension, 1024);
        assert_eq!(config.photo.jpeg_quality, 80);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = DutyConfig::default();
        config.store.snapshot_path = Some(dir.path().join("checklist.json"));
        config.logging.filter = "dutyboard=debug".to_owned();
        config.save_to_file(&path).unwrap();

        let loaded = DutyConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.store.resolved_snapshot_path(),
            dir.path().join("checklist.json")
        );
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[photo\nmax_dimension = ").unwrap();
        let err = DutyConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DutyError::Config(_)));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DutyConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DutyConfig::default());
    }
}
