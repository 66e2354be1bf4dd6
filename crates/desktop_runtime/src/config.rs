//! Typed window-manager configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for window placement, stacking, and transition timing.
///
/// Every field falls back to its default when absent, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// X coordinate of the first cascade slot.
    pub cascade_origin_x: i32,
    /// Y coordinate of the first cascade slot.
    pub cascade_origin_y: i32,
    /// Offset applied per cascade slot on both axes.
    pub cascade_step: i32,
    /// Number of cascade slots before placement wraps to the first one.
    pub cascade_wrap: usize,
    /// Stacking counter start; the first assigned z-index is one above it.
    pub z_index_base: u64,
    /// Height reserved for the taskbar at the bottom of the viewport.
    pub taskbar_height: i32,
    /// Exit transition length before a closing window is removed.
    pub close_transition_ms: u32,
    /// Delay between window creation and running the panel initializer.
    pub mount_delay_ms: u32,
    /// Fade-out length between shutdown and the goodbye screen.
    pub shutdown_fade_ms: u32,
    /// Viewport width assumed until the host reports one.
    pub default_viewport_width: i32,
    /// Viewport height assumed until the host reports one.
    pub default_viewport_height: i32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            cascade_origin_x: 100,
            cascade_origin_y: 60,
            cascade_step: 40,
            cascade_wrap: 5,
            z_index_base: 100,
            taskbar_height: 52,
            close_transition_ms: 150,
            mount_delay_ms: 50,
            shutdown_fade_ms: 500,
            default_viewport_width: 1280,
            default_viewport_height: 800,
        }
    }
}

#[derive(Debug, Error)]
/// Configuration loading failures.
pub enum ConfigError {
    /// The document is not valid TOML or has mistyped fields.
    #[error("failed to parse desktop config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field holds a value the window manager cannot work with.
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

impl DesktopConfig {
    /// Parses and validates a TOML config document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cascade_wrap == 0 {
            return Err(ConfigError::Invalid(
                "cascade_wrap must be at least 1".to_string(),
            ));
        }
        if self.taskbar_height < 0 {
            return Err(ConfigError::Invalid(
                "taskbar_height must not be negative".to_string(),
            ));
        }
        if self.default_viewport_width <= 0 || self.default_viewport_height <= 0 {
            return Err(ConfigError::Invalid(
                "default viewport dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(
            DesktopConfig::from_toml_str("").expect("parse"),
            DesktopConfig::default()
        );
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config = DesktopConfig::from_toml_str(
            r#"
cascade_step = 24
close_transition_ms = 300
"#,
        )
        .expect("parse");
        assert_eq!(config.cascade_step, 24);
        assert_eq!(config.close_transition_ms, 300);
        assert_eq!(config.cascade_wrap, 5);
    }

    #[test]
    fn mistyped_and_invalid_values_are_rejected() {
        assert!(matches!(
            DesktopConfig::from_toml_str("cascade_step = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DesktopConfig::from_toml_str("cascade_wrap = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
