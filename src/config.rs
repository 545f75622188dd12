//! Configuration types for the perception pipeline.
//!
//! Every formerly hard-coded constant of the pipeline lives here as a
//! named, documented value: the rectification correspondence points,
//! classification thresholds, sample color band, confidence weights,
//! the navigable-wins cutover, and the bearing cutoff. Defaults match
//! the calibration this pipeline was tuned with (a 320x160 forward
//! camera on a simulated rover over a 200x200 world grid).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Camera mount calibration for the ground-plane rectification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Expected camera frame width in pixels.
    pub frame_width: usize,

    /// Expected camera frame height in pixels.
    pub frame_height: usize,

    /// Four image-space points (x, y) outlining a known square patch of
    /// ground in the forward view: bottom-left, bottom-right, top-right,
    /// top-left. Calibrated once for the camera mount geometry.
    pub source_quad: [[f32; 2]; 4],

    /// Half-width of the destination square in rectified pixels. The
    /// known ground patch maps to a `2 * dst_half_width` pixel square,
    /// which also fixes the pixels-per-world-unit scale.
    pub dst_half_width: f32,

    /// Gap in pixels between the destination square and the bottom edge
    /// of the rectified view, so the square sits just ahead of the
    /// rover's reference point.
    pub bottom_offset: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            frame_width: 320,
            frame_height: 160,
            source_quad: [
                [14.0, 140.0],
                [301.0, 140.0],
                [200.0, 96.0],
                [118.0, 96.0],
            ],
            dst_half_width: 5.0,
            bottom_offset: 6.0,
        }
    }
}

impl CalibrationConfig {
    /// Destination quad for the homography, derived from the frame
    /// dimensions so the rover's apparent position is centered at the
    /// bottom of the rectified view. Same corner order as
    /// [`CalibrationConfig::source_quad`].
    pub fn destination_quad(&self) -> [[f32; 2]; 4] {
        let w = self.frame_width as f32;
        let h = self.frame_height as f32;
        let d = self.dst_half_width;
        let b = self.bottom_offset;
        [
            [w / 2.0 - d, h - b],
            [w / 2.0 + d, h - b],
            [w / 2.0 + d, h - 2.0 * d - b],
            [w / 2.0 - d, h - 2.0 * d - b],
        ]
    }

    /// Rectified pixels per world-grid unit: the destination square is
    /// `2 * dst_half_width` pixels across and covers one world unit.
    #[inline]
    pub fn world_scale(&self) -> f32 {
        2.0 * self.dst_half_width
    }
}

/// Pixel classification thresholds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Per-channel lower bounds for navigable terrain: a pixel is
    /// navigable iff every channel strictly exceeds its bound.
    pub terrain_floor: [u8; 3],

    /// Inclusive per-channel lower bound of the sample color band.
    pub sample_lower: [u8; 3],

    /// Inclusive per-channel upper bound of the sample color band.
    pub sample_upper: [u8; 3],
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            terrain_floor: [160, 160, 160],
            sample_lower: [110, 110, 0],
            sample_upper: [240, 240, 80],
        }
    }
}

/// World map geometry and accumulation weights.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// World grid side length in cells (the grid is square).
    pub world_size: usize,

    /// Confidence added to the navigable channel per observed cell.
    pub navigable_weight: u32,

    /// Confidence added to the obstacle channel per observed cell.
    pub obstacle_weight: u32,

    /// Confidence added to all three channels of the representative
    /// sample cell when a sample is in view.
    pub sample_weight: u32,

    /// Navigable confidence above which a cell's obstacle confidence is
    /// reset to zero. Applied across the whole map every tick.
    pub navigable_override: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_size: 200,
            navigable_weight: 2,
            obstacle_weight: 1,
            sample_weight: 10,
            navigable_override: 200,
        }
    }
}

/// Navigation cue extraction parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavConfig {
    /// Bearing cutoff in radians (~60 degrees). The pipeline reports
    /// what share of navigable bearings lies beyond it; the steering
    /// collaborator decides what to do with that.
    pub bearing_cutoff_rad: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            bearing_cutoff_rad: 1.047,
        }
    }
}

/// Full perception pipeline configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Camera calibration (rectification geometry).
    pub calibration: CalibrationConfig,
    /// Classification thresholds and color band.
    pub classifier: ClassifierConfig,
    /// World map geometry and weights.
    pub map: MapConfig,
    /// Navigation cue parameters.
    pub nav: NavConfig,
}

impl PerceptionConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml_file(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_calibration() {
        let cal = CalibrationConfig::default();
        assert_eq!(cal.frame_width, 320);
        assert_eq!(cal.frame_height, 160);
        assert_relative_eq!(cal.world_scale(), 10.0);
    }

    #[test]
    fn test_destination_quad_centers_rover() {
        let cal = CalibrationConfig::default();
        let dst = cal.destination_quad();
        // Bottom edge sits bottom_offset above the frame edge, centered.
        assert_relative_eq!(dst[0][0], 155.0);
        assert_relative_eq!(dst[0][1], 154.0);
        assert_relative_eq!(dst[1][0], 165.0);
        assert_relative_eq!(dst[1][1], 154.0);
        // Top edge is one square side further up.
        assert_relative_eq!(dst[2][1], 144.0);
        assert_relative_eq!(dst[3][1], 144.0);
    }

    #[test]
    fn test_default_weights() {
        let map = MapConfig::default();
        assert_eq!(map.world_size, 200);
        assert_eq!(map.navigable_weight, 2);
        assert_eq!(map.obstacle_weight, 1);
        assert_eq!(map.sample_weight, 10);
        assert_eq!(map.navigable_override, 200);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PerceptionConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = PerceptionConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.map.world_size, config.map.world_size);
        assert_eq!(parsed.classifier.terrain_floor, config.classifier.terrain_floor);
        assert_relative_eq!(parsed.calibration.dst_half_width, 5.0);
    }

    #[test]
    fn test_yaml_rejects_garbage() {
        assert!(PerceptionConfig::from_yaml(": not yaml [").is_err());
    }
}
