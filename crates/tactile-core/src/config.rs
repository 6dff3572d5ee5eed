//! Dispatcher configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How single touches are turned into mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MouseEmulation {
    /// Capture one touch per session; down on its first move or release,
    /// drags while it moves alone, up when it lifts.
    #[default]
    Capture,
    /// Map every touch phase 1:1 to a mouse event while fewer than two
    /// touches are down.
    Immediate,
    /// No mouse synthesis.
    Off,
}

/// Configuration for touch dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Converts native horizontal scroll units to pixels.
    pub scroll_multiplier_x: f64,
    /// Converts native vertical scroll units to pixels.
    pub scroll_multiplier_y: f64,
    /// Report moves that do not change coordinates as stationary.
    pub filter_touch_coordinates: bool,
    /// Single-touch mouse synthesis policy.
    pub mouse_emulation: MouseEmulation,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            scroll_multiplier_x: 1.0,
            scroll_multiplier_y: 1.0,
            filter_touch_coordinates: true,
            mouse_emulation: MouseEmulation::Capture,
        }
    }
}

/// Error type for touch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse TOML
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize TOML
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Failed to read file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid configuration value
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Offending key
        field: &'static str,
        /// Rejected value
        value: String,
    },
}

impl TouchConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = "tactile.toml";

    /// Same multiplier on both axes.
    #[must_use]
    pub fn with_scroll_multiplier(mut self, multiplier: f64) -> Self {
        self.scroll_multiplier_x = multiplier;
        self.scroll_multiplier_y = multiplier;
        self
    }

    /// Select the mouse synthesis policy.
    #[must_use]
    pub const fn with_mouse_emulation(mut self, mode: MouseEmulation) -> Self {
        self.mouse_emulation = mode;
        self
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid or values are out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from the default config file in the current directory.
    ///
    /// Returns the default config if the file is missing or invalid.
    #[must_use]
    pub fn load_default() -> Self {
        let path = Path::new(Self::CONFIG_FILE);
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(err) => {
                tracing::warn!(%err, "ignoring {}", Self::CONFIG_FILE);
                Self::default()
            }
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for non-finite or non-positive
    /// multipliers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scroll_multiplier_x", self.scroll_multiplier_x),
            ("scroll_multiplier_y", self.scroll_multiplier_y),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TouchConfig::default();
        assert_eq!(config.scroll_multiplier_x, 1.0);
        assert_eq!(config.scroll_multiplier_y, 1.0);
        assert!(config.filter_touch_coordinates);
        assert_eq!(config.mouse_emulation, MouseEmulation::Capture);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = TouchConfig::from_toml("scroll_multiplier_y = 2.5\nmouse_emulation = \"immediate\"\n")
            .unwrap();
        assert_eq!(config.scroll_multiplier_x, 1.0);
        assert_eq!(config.scroll_multiplier_y, 2.5);
        assert_eq!(config.mouse_emulation, MouseEmulation::Immediate);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(TouchConfig::from_toml("").unwrap(), TouchConfig::default());
    }

    #[test]
    fn test_from_toml_invalid_syntax() {
        let err = TouchConfig::from_toml("scroll_multiplier_x = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("parse error"));
    }

    #[test]
    fn test_from_toml_rejects_zero_multiplier() {
        let err = TouchConfig::from_toml("scroll_multiplier_x = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "scroll_multiplier_x",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = TouchConfig::default().with_scroll_multiplier(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TouchConfig::default()
            .with_scroll_multiplier(3.0)
            .with_mouse_emulation(MouseEmulation::Off);
        let parsed = TouchConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_to_toml_contains_fields() {
        let text = TouchConfig::default()
            .with_mouse_emulation(MouseEmulation::Immediate)
            .to_toml()
            .unwrap();
        assert!(text.contains("scroll_multiplier_x = 1.0"));
        assert!(text.contains("mouse_emulation = \"immediate\""));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = TouchConfig::load_from_file(Path::new("/nonexistent/tactile.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tactile-config-{}.toml", std::process::id()));
        std::fs::write(&path, "filter_touch_coordinates = false\n").unwrap();
        let config = TouchConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(!config.filter_touch_coordinates);
    }
}
