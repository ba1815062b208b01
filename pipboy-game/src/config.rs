//! Display and layout settings for a PIP-Boy session.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILE, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_STYLESHEET_HREF};
use crate::error::SessionError;

const DEFAULT_CONFIG_DATA: &str = include_str!("../data/pipboy.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipBoyConfig {
    /// Screen tint: green, amber, blue or white.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub boot_sequence: bool,
    #[serde(default = "default_map_height")]
    pub map_height: u16,
    #[serde(default = "default_map_width")]
    pub map_width: u16,
    #[serde(default = "default_stylesheet_href")]
    pub stylesheet_href: String,
}

impl Default for PipBoyConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            boot_sequence: true,
            map_height: DEFAULT_MAP_HEIGHT,
            map_width: DEFAULT_MAP_WIDTH,
            stylesheet_href: default_stylesheet_href(),
        }
    }
}

impl PipBoyConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CONFIG_DATA).unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read `pipboy.json` from `directory`, falling back to the bundled
    /// defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when the file exists but does not
    /// parse, or [`SessionError::Io`] when it cannot be read.
    pub fn load(directory: &Path) -> Result<Self, SessionError> {
        let path = directory.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(json) => {
                let config = Self::from_json(&json)
                    .map_err(|source| SessionError::Config { path: path.clone(), source })?;
                log::debug!("loaded configuration from {}", path.display());
                Ok(config.normalized())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::load_from_static()),
            Err(err) => Err(SessionError::io(path, err)),
        }
    }

    /// Replace degenerate map dimensions with the defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.map_height == 0 {
            self.map_height = DEFAULT_MAP_HEIGHT;
        }
        if self.map_width == 0 {
            self.map_width = DEFAULT_MAP_WIDTH;
        }
        self
    }
}

fn default_color() -> String {
    "green".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_map_height() -> u16 {
    DEFAULT_MAP_HEIGHT
}

const fn default_map_width() -> u16 {
    DEFAULT_MAP_WIDTH
}

fn default_stylesheet_href() -> String {
    DEFAULT_STYLESHEET_HREF.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(PipBoyConfig::load_from_static(), PipBoyConfig::default());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = PipBoyConfig::from_json(r#"{ "color": "amber" }"#).unwrap();
        assert_eq!(config.color, "amber");
        assert!(config.boot_sequence);
        assert_eq!(config.map_width, DEFAULT_MAP_WIDTH);
        assert_eq!(config.stylesheet_href, DEFAULT_STYLESHEET_HREF);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipBoyConfig::load(dir.path()).unwrap();
        assert_eq!(config, PipBoyConfig::default());
    }

    #[test]
    fn load_reads_and_normalizes_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "boot_sequence": false, "map_height": 0, "map_width": 12 }"#,
        )
        .unwrap();
        let config = PipBoyConfig::load(dir.path()).unwrap();
        assert!(!config.boot_sequence);
        assert_eq!(config.map_height, DEFAULT_MAP_HEIGHT);
        assert_eq!(config.map_width, 12);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = PipBoyConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, SessionError::Config { .. }));
    }
}
