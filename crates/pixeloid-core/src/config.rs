//! Editor configuration.

use crate::camera::{Camera, DEFAULT_CELL_SIZE};
use crate::error::{ConfigError, GeometryResult};
use crate::shapes::{DiamondPolicy, HitTolerance, ShapeStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the editor core. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Max gap between two clicks on one object that counts as a double click.
    pub double_click_ms: u64,
    /// Selection tolerances.
    pub hit: HitTolerance,
    /// Style applied to newly drawn shapes.
    pub default_style: ShapeStyle,
    /// Height derivation for dragged diamonds.
    pub diamond: DiamondPolicy,
    /// Round draw points to whole pixeloids.
    pub snap_drawing: bool,
    /// Initial pixels per pixeloid.
    pub cell_size: f64,
    pub min_cell_size: f64,
    pub max_cell_size: f64,
    /// Zoom factor applied per scroll step.
    pub zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 300,
            hit: HitTolerance::default(),
            default_style: ShapeStyle::default(),
            diamond: DiamondPolicy::default(),
            snap_drawing: false,
            cell_size: DEFAULT_CELL_SIZE,
            min_cell_size: 1.0,
            max_cell_size: 128.0,
            zoom_step: 1.1,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check values serde cannot: ranges and orderings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_cell_size > 0.0 && self.min_cell_size <= self.max_cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell size range {}..{} is empty or non-positive",
                self.min_cell_size, self.max_cell_size
            )));
        }
        if !(self.min_cell_size..=self.max_cell_size).contains(&self.cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell size {} outside {}..{}",
                self.cell_size, self.min_cell_size, self.max_cell_size
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!("zoom step must exceed 1, got {}", self.zoom_step)));
        }
        let hit = &self.hit;
        if hit.point_halo < 0.0 || hit.line_min_tolerance < 0.0 || hit.line_stroke_factor < 0.0 {
            return Err(ConfigError::Invalid("hit tolerances must be non-negative".to_string()));
        }
        Ok(())
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    /// Build the camera described by this config.
    pub fn camera(&self) -> GeometryResult<Camera> {
        Camera::with_cell_size(self.cell_size, self.min_cell_size, self.max_cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.double_click_window(), Duration::from_millis(300));
        assert!((config.hit.point_halo - 2.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "double_click_ms": 500, "hit": { "point_halo": 4.0 } }"#).unwrap();
        assert_eq!(config.double_click_ms, 500);
        assert!((config.hit.point_halo - 4.0).abs() < f64::EPSILON);
        assert!((config.hit.line_min_tolerance - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.diamond, DiamondPolicy::BoundingBox);
    }

    #[test]
    fn test_diamond_policy_from_json() {
        let config = EditorConfig::from_json(r#"{ "diamond": "isometric" }"#).unwrap();
        assert_eq!(config.diamond, DiamondPolicy::Isometric);
    }

    #[test]
    fn test_roundtrip_json() {
        let config = EditorConfig { snap_drawing: true, ..EditorConfig::default() };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(EditorConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "min_cell_size": 20.0, "max_cell_size": 10.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "cell_size": 0.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "zoom_step": 0.5 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
