//! Sector generation configuration with documented constants
//!
//! The node cap and pass count were tuned for how a sector map looks once
//! drawn; they are not topological limits, so everything here is adjustable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::ConfigError;

/// Configuration for one sector build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    /// Maximum number of worlds in a sector, capital included
    ///
    /// Expansion stops silently once this many worlds exist, even in the
    /// middle of a tier. The sector's `truncated` flag records when it hit.
    pub node_cap: usize,

    /// Number of tier-expansion passes after the capital is seeded
    ///
    /// Pass one expands the capital, pass two expands the capital's
    /// very-close and close neighbours. Never iterated to a fixed point.
    pub expansion_passes: u32,

    /// Attempts allowed per name before synthesis gives up
    ///
    /// Every rejected candidate (duplicate, sector-name match, dead-end walk)
    /// costs one attempt.
    pub name_retries: u32,

    /// Fall back to catalogue designations (`HUB-007`) when names run out
    ///
    /// When false, exhausting `name_retries` aborts the sector.
    pub name_fallback: bool,

    /// Spatial layout parameters
    pub layout: LayoutConfig,
}

/// Parameters for the force-directed layout and canvas mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Spring layout iterations
    pub iterations: u32,

    /// Canvas width in pixels
    pub width: f32,

    /// Canvas height in pixels
    pub height: f32,

    /// Blank border kept around laid-out worlds
    ///
    /// Distant and far pointers are pushed past it onto the canvas edge.
    pub margin: f32,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            node_cap: 16,
            expansion_passes: 2,
            name_retries: 200,
            name_fallback: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 150,
            width: 1000.0,
            height: 1000.0,
            margin: 60.0,
        }
    }
}

impl SectorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing fields take defaults
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SectorConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_cap == 0 {
            return Err(ConfigError::InvalidConfig(
                "node_cap must leave room for the capital".into(),
            ));
        }

        if self.name_retries == 0 {
            return Err(ConfigError::InvalidConfig("name_retries must be positive".into()));
        }

        let layout = &self.layout;
        if layout.width <= 0.0 || layout.height <= 0.0 {
            return Err(ConfigError::InvalidConfig(format!(
                "canvas must have positive size, got {}x{}",
                layout.width, layout.height
            )));
        }

        // Margins on both sides must leave a drawable area
        if layout.margin < 0.0
            || layout.margin * 2.0 >= layout.width
            || layout.margin * 2.0 >= layout.height
        {
            return Err(ConfigError::InvalidConfig(format!(
                "margin ({}) does not fit a {}x{} canvas",
                layout.margin, layout.width, layout.height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.node_cap, 16);
        assert_eq!(config.expansion_passes, 2);
        assert_eq!(config.layout.iterations, 150);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            node_cap = 10

            [layout]
            width = 800.0
        "#;
        let config = SectorConfig::parse_toml(toml_str).unwrap();
        assert_eq!(config.node_cap, 10);
        assert_eq!(config.expansion_passes, 2);
        assert_eq!(config.layout.width, 800.0);
        assert_eq!(config.layout.height, 1000.0);
    }

    #[test]
    fn test_rejects_zero_cap() {
        let err = SectorConfig::parse_toml("node_cap = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_oversized_margin() {
        let mut config = SectorConfig::default();
        config.layout.margin = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SectorConfig::parse_toml("node_cap = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
