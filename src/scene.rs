//! Render configuration
//!
//! Everything that used to be a tweakable constant (light, background
//! gradient, gamma, camera) lives in one immutable struct handed to the
//! render pass. Uses RON (Rusty Object Notation) for human-readable
//! config files.

use crate::rasterizer::{Color, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable per-render settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directional light (not required to be unit length; face normals are)
    pub light_dir: Vec3,
    pub light_color: Color,
    /// Fixed factor applied to the light color before blending
    pub light_intensity: f32,
    /// Background gradient endpoints; the first carries the blend weight
    pub background_primary: Color,
    pub background_secondary: Color,
    /// Gamma exponent applied after all drawing
    pub gamma: f32,
    /// Perspective camera distance; None renders orthographic
    pub camera_distance: Option<f32>,
    /// Depth range scaled into the z-buffer by the viewport matrix
    pub depth_range: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            light_dir: Vec3::new(0.0, 0.0, -1.0),
            light_color: Color::WHITE,
            light_intensity: 0.4,
            background_primary: Color::new(52, 232, 158),
            background_secondary: Color::new(15, 52, 67),
            gamma: 2.0,
            camera_distance: None,
            depth_range: 255.0,
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

/// Load a render config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

/// Save a render config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a render config from a RON string (for embedded configs or testing)
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_constants() {
        let config = RenderConfig::default();
        assert_eq!(config.light_dir, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(config.light_intensity, 0.4);
        assert_eq!(config.depth_range, 255.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = RenderConfig {
            camera_distance: Some(3.0),
            gamma: 2.2,
            ..Default::default()
        };
        let path = std::env::temp_dir().join("tinyframe_config_round_trip.ron");
        save_config(&config, &path).unwrap();
        let back = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.camera_distance, Some(3.0));
        assert_eq!(back.gamma, 2.2);
        assert_eq!(back.light_color, config.light_color);
    }

    #[test]
    fn test_load_rejects_malformed() {
        assert!(load_config_from_str("(light_dir: oops)").is_err());
    }
}
