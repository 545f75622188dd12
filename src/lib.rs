//! # Drishti-Map: Camera-Based Terrain Perception for Ground Rovers
//!
//! Converts forward-facing camera frames into an incrementally-built
//! top-down occupancy map distinguishing navigable ground, obstacles,
//! and a distinguished target object ("sample"), plus polar-coordinate
//! navigation cues for an external steering layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use drishti_map::{PerceptionConfig, PerceptionPipeline, RgbFrame, RoverPose, WorldMap};
//!
//! let config = PerceptionConfig::default();
//! let mut map = WorldMap::new(config.map.world_size);
//! let pipeline = PerceptionPipeline::new(config).unwrap();
//!
//! // One camera frame per tick (320x160 for the default calibration)
//! let frame = RgbFrame::new(320, 160);
//! let pose = RoverPose::new(100.0, 100.0, 0.0);
//!
//! let step = pipeline.process(&frame, pose, &mut map).unwrap();
//! println!(
//!     "navigable pixels: {}, directions: {}",
//!     step.navigable_pixels,
//!     step.nav.polar.len()
//! );
//! ```
//!
//! ## Coordinate Frames
//!
//! - **Rover frame**: origin at the vehicle's bottom-center in the
//!   rectified view, X forward, Y lateral (positive left). Angles are
//!   signed bearings from the forward axis, CCW positive, in radians.
//! - **World frame**: fixed square grid of [`WorldMap::size`] cells per
//!   side. The rover pose maps rover-frame points into it: rotate by
//!   yaw, scale by pixels-per-world-unit, translate by position, clip.
//!
//! ## Data Flow
//!
//! ```text
//!  ┌───────────────┐
//!  │  Camera frame │  H x W x 3, one per tick
//!  └───────┬───────┘
//!          │ rectify (fixed ground-plane homography)
//!          ▼
//!  ┌───────────────┐     ┌───────────────┐
//!  │ Rectified view│     │ Validity mask │  in-view region of the warp
//!  └───────┬───────┘     └───────┬───────┘
//!          │ classify            │
//!     ┌────┴─────┬───────────────┴──┐
//!     ▼          ▼                  ▼
//! ┌─────────┐ ┌────────┐      ┌──────────┐
//! │navigable│ │ sample │      │ obstacle │ = !navigable within valid
//! └────┬────┘ └───┬────┘      └────┬─────┘
//!      │          │                │  pixel -> rover -> world
//!      └──────────┼────────────────┘
//!                 ▼
//!         ┌───────────────┐
//!         │   WorldMap    │  3 confidence channels, navigable-wins rule
//!         └───────────────┘
//!                 │
//!                 ▼
//!         ┌───────────────┐
//!         │ Polar nav cues│  (distance, bearing) per navigable pixel
//!         └───────────────┘
//! ```
//!
//! ## Concurrency
//!
//! The pipeline is single-threaded and synchronous: one full pass per
//! frame. The [`WorldMap`] is the only persistent mutable state; it is
//! passed by exclusive reference and ticks must not overlap.

pub mod classify;
pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod nav;
pub mod pipeline;
pub mod rectify;
pub mod transform;

pub use config::{
    CalibrationConfig, ClassifierConfig, MapConfig, NavConfig, PerceptionConfig,
};
pub use core::{BinaryMask, GridCoord, PolarObservation, RgbFrame, RoverPoints, RoverPose};
pub use error::{DrishtiError, Result};
pub use grid::{MapUpdate, WorldMap};
pub use nav::NavCues;
pub use pipeline::{PerceptionPipeline, PerceptionStep};
pub use rectify::{Homography, PerspectiveRectifier};
