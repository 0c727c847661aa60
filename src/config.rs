//! Scene configuration.
//!
//! Every constant of the backdrop effect lives in [`SceneConfig`]. The
//! defaults reproduce the stock look; a JSON file can override any subset
//! of fields:
//!
//! ```ignore
//! use particle_backdrop::SceneConfig;
//!
//! let config = SceneConfig::load("backdrop.json")?;
//! config.save("backdrop.out.json")?;
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::edges::MAX_GRID_CELL;
use crate::error::ConfigError;

/// Algorithm used to derive the proximity edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBuilder {
    /// Test every pair of points.
    #[default]
    BruteForce,
    /// Bucket points into a uniform grid and test neighboring cells only.
    Grid,
}

/// What the animator does when the theme flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSwitch {
    /// Tear the scene down and build a new one (new points, new edges).
    #[default]
    Rebuild,
    /// Keep the geometry and only swap colors.
    Recolor,
}

/// Complete backdrop configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of points in the field.
    pub particle_count: u32,
    /// Points are sampled in `[-half_extent, half_extent)` on each axis.
    pub half_extent: f32,
    /// Pairs strictly closer than this are joined by a line.
    pub edge_threshold: f32,
    /// Point sprite size in world units.
    pub point_size: f32,
    /// Per-frame (x, y) rotation increment of the point cloud, radians.
    pub point_rotation_rate: Vec2,
    /// Per-frame (x, y) rotation increment of the line mesh, radians.
    pub edge_rotation_rate: Vec2,
    /// Vertical offset per pixel of scroll.
    pub scroll_factor: f32,
    /// Camera travel for a pointer at the viewport edge.
    pub pointer_range: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera z position.
    pub camera_distance: f32,
    pub particle_opacity: f32,
    pub edge_opacity: f32,
    /// Fixed RNG seed; `None` samples a fresh field every mount.
    pub seed: Option<u64>,
    pub edge_builder: EdgeBuilder,
    pub theme_switch: ThemeSwitch,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            half_extent: 100.0,
            edge_threshold: 30.0,
            point_size: 0.5,
            point_rotation_rate: Vec2::new(0.0001, 0.0002),
            edge_rotation_rate: Vec2::new(0.00005, 0.0001),
            scroll_factor: 0.01,
            pointer_range: 5.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 30.0,
            particle_opacity: 0.6,
            edge_opacity: 0.2,
            seed: None,
            edge_builder: EdgeBuilder::BruteForce,
            theme_switch: ThemeSwitch::Rebuild,
        }
    }
}

impl SceneConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Builder-style seed override, mostly for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Check ranges that would otherwise panic or produce a degenerate camera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "half_extent must be positive, got {}",
                self.half_extent
            )));
        }
        if !self.edge_threshold.is_finite() {
            return Err(ConfigError::Invalid("edge_threshold must be finite".into()));
        }
        if self.edge_threshold > 0.0 && self.half_extent / self.edge_threshold > MAX_GRID_CELL {
            return Err(ConfigError::Invalid(format!(
                "edge_threshold {} is too small for half_extent {}",
                self.edge_threshold, self.half_extent
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_effect() {
        let config = SceneConfig::default();
        assert_eq!(config.particle_count, 2000);
        assert_eq!(config.half_extent, 100.0);
        assert_eq!(config.edge_threshold, 30.0);
        assert_eq!(config.scroll_factor, 0.01);
        assert_eq!(config.pointer_range, 5.0);
        assert_eq!(config.theme_switch, ThemeSwitch::Rebuild);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "particle_count": 50, "edge_builder": "grid" }"#).unwrap();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.edge_builder, EdgeBuilder::Grid);
        assert_eq!(config.edge_threshold, 30.0);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("backdrop-config-{}.json", std::process::id()));
        let config = SceneConfig::default().with_seed(7).with_particle_count(10);
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = SceneConfig::default();
        config.half_extent = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.near = 10.0;
        config.far = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_threshold_below_grid_resolution() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "edge_builder": "grid", "edge_threshold": 1e-9 }"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.edge_threshold = 0.001;
        assert!(config.validate().is_ok());
    }
}
