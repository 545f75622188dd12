//! Core types for the drishti-map perception pipeline.
//!
//! This module provides the fundamental types used throughout the crate:
//! - [`RgbFrame`]: row-major H×W×3 color image buffer
//! - [`BinaryMask`]: H×W grid constrained to {0, 1}
//! - [`RoverPose`]: externally-supplied vehicle pose (position + yaw)
//! - [`RoverPoints`]: rover-centric point set in SoA layout
//! - [`PolarObservation`]: parallel (distance, bearing) sequences
//! - [`GridCoord`]: integer world-grid cell coordinate

mod image;
mod point;
mod polar;
mod pose;

pub use image::{BinaryMask, RgbFrame};
pub use point::{GridCoord, RoverPoints};
pub use polar::PolarObservation;
pub use pose::RoverPose;
