//! RON settings loader
//!
//! Loads settings from an external RON file, with fallback to defaults.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::settings::Settings;

/// Settings file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

impl Settings {
    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Parse settings from RON text; missing fields take their defaults
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}. Using default settings.", e);
                Self::default()
            }
        }
    }

    /// Write these settings as pretty RON, creating parent directories
    pub fn export(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sharing::Sharable;

    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("realmkeep.ron");

        let mut settings = Settings::default();
        settings.separate_game_modes = false;
        settings.cache.max_size = 12;
        settings.share.set(Sharable::Exhaustion, false);

        settings.export(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_ron("(separate_game_modes: false, cache: (max_size: 5))").unwrap();
        assert!(!settings.separate_game_modes);
        assert_eq!(settings.cache.max_size, 5);
        assert_eq!(settings.cache.expiry_minutes, 30);
        assert!(settings.share.inventory);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(separate_game_modes: maybe").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        assert!(matches!(Settings::load(&path), Err(ConfigError::Io { .. })));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
