//! Per-tick perception pipeline.
//!
//! One call to [`PerceptionPipeline::process`] runs the full pass for
//! one camera frame: rectify, classify, transform, accumulate into the
//! world map, and extract navigation cues. Inputs and outputs are
//! explicit — the frame is borrowed, the pose is a value, the map is
//! an exclusive reference, and everything produced comes back in the
//! returned [`PerceptionStep`].

use crate::classify;
use crate::config::PerceptionConfig;
use crate::core::{BinaryMask, RgbFrame, RoverPose};
use crate::error::{DrishtiError, Result};
use crate::grid::{self, MapUpdate, WorldMap};
use crate::nav::{self, NavCues};
use crate::rectify::PerspectiveRectifier;
use crate::transform;

/// Everything one tick produces besides the map mutation.
#[derive(Clone, Debug)]
pub struct PerceptionStep {
    /// Navigation cues for the steering collaborator.
    pub nav: NavCues,

    /// Debug visualization, same dimensions as the input frame:
    /// channel 0 = obstacle mask, channel 1 = sample mask,
    /// channel 2 = navigable mask, each scaled to 255.
    pub overlay: RgbFrame,

    /// Map accumulation statistics for this tick.
    pub update: MapUpdate,

    /// Rectified pixels classified navigable this tick.
    pub navigable_pixels: usize,
    /// Rectified pixels classified obstacle this tick.
    pub obstacle_pixels: usize,
    /// Rectified pixels matching the sample color band this tick.
    pub sample_pixels: usize,
}

/// The perception pipeline: camera frames in, map updates and
/// navigation cues out.
///
/// Construction solves the rectification homography once; after that a
/// pipeline is immutable and every tick is a pure function of
/// (frame, pose) plus the map it mutates. Ticks must be serialized by
/// the caller — the map has exactly one writer.
#[derive(Clone, Debug)]
pub struct PerceptionPipeline {
    config: PerceptionConfig,
    rectifier: PerspectiveRectifier,
}

impl PerceptionPipeline {
    /// Build a pipeline from a configuration.
    pub fn new(config: PerceptionConfig) -> Result<Self> {
        let rectifier = PerspectiveRectifier::new(&config.calibration)?;
        Ok(Self { config, rectifier })
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Run one full perception pass.
    ///
    /// Fails only on a frame whose dimensions disagree with the
    /// calibration; everything else is a pure numeric transform. A NaN
    /// pose is a caller precondition violation and flows through the
    /// transforms unmasked.
    pub fn process(
        &self,
        frame: &RgbFrame,
        pose: RoverPose,
        map: &mut WorldMap,
    ) -> Result<PerceptionStep> {
        if frame.width() != self.rectifier.width() || frame.height() != self.rectifier.height() {
            return Err(DrishtiError::DimensionMismatch {
                expected_width: self.rectifier.width(),
                expected_height: self.rectifier.height(),
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }

        // Rectify into the top-down view and classify.
        let (warped, validity) = self.rectifier.rectify(frame);
        let classifier = &self.config.classifier;
        let navigable = classify::threshold_terrain(&warped, classifier.terrain_floor);
        let sample = classify::detect_sample(&warped, classifier.sample_lower, classifier.sample_upper);
        let obstacles = classify::derive_obstacles(&navigable, &validity);

        // Pixel masks to rover-centric point sets.
        let navigable_points = transform::rover_points(&navigable);
        let obstacle_points = transform::rover_points(&obstacles);
        let sample_points = transform::rover_points(&sample);

        // Rover frame to world grid. The grid the caller handed over
        // decides the clipping bound, not the configured size.
        let scale = self.config.calibration.world_scale();
        let world_size = map.size();
        let navigable_world = transform::points_to_world(&navigable_points, pose, scale, world_size);
        let obstacle_world = transform::points_to_world(&obstacle_points, pose, scale, world_size);

        // Representative sample cell: closest forward coordinate, mean
        // lateral coordinate. Skipped entirely when no sample pixel is
        // in view (a mean or min over an empty set is undefined).
        let sample_cell = match (sample_points.min_forward(), sample_points.mean_lateral()) {
            (Some(forward), Some(lateral)) => Some(transform::point_to_world(
                forward, lateral, pose, scale, world_size,
            )),
            _ => None,
        };

        let update = grid::apply_observation(
            map,
            &navigable_world,
            &obstacle_world,
            sample_cell,
            &self.config.map,
        );

        let nav = nav::extract(&navigable_points, self.config.nav.bearing_cutoff_rad);
        let overlay = render_overlay(&obstacles, &sample, &navigable);

        log::debug!(
            "tick: {} navigable / {} obstacle / {} sample px, {} obstacle cells suppressed, sample cell {:?}",
            navigable_points.len(),
            obstacle_points.len(),
            sample_points.len(),
            update.obstacles_suppressed,
            update.sample_cell,
        );

        Ok(PerceptionStep {
            nav,
            overlay,
            update,
            navigable_pixels: navigable_points.len(),
            obstacle_pixels: obstacle_points.len(),
            sample_pixels: sample_points.len(),
        })
    }
}

/// Render the per-tick debug overlay from the three class masks.
fn render_overlay(obstacles: &BinaryMask, sample: &BinaryMask, navigable: &BinaryMask) -> RgbFrame {
    let mut overlay = RgbFrame::new(navigable.width(), navigable.height());
    for row in 0..navigable.height() {
        for col in 0..navigable.width() {
            overlay.set(
                row,
                col,
                [
                    obstacles.get(row, col) * 255,
                    sample.get(row, col) * 255,
                    navigable.get(row, col) * 255,
                ],
            );
        }
    }
    overlay
}
