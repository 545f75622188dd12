//! Navigation cue extraction.
//!
//! Summarizes the navigable pixel set as polar coordinates for the
//! external steering collaborator. The cues are rover-centric, not
//! world-transformed: steering reasons about "where can I drive from
//! here", not about map cells.

use crate::core::{PolarObservation, RoverPoints};
use crate::transform;

/// Per-tick navigation cues.
#[derive(Clone, Debug, Default)]
pub struct NavCues {
    /// Polar (distance, bearing) of every navigable pixel, rover frame.
    pub polar: PolarObservation,

    /// Share of navigable bearings beyond the configured cutoff
    /// (strictly greater). Exposed for the steering collaborator;
    /// no control behavior is derived from it here. NaN when no
    /// navigable pixels are in view.
    pub beyond_cutoff_share: f32,
}

/// Extract navigation cues from the navigable rover-centric point set.
pub fn extract(navigable: &RoverPoints, bearing_cutoff_rad: f32) -> NavCues {
    let polar = transform::to_polar(navigable);
    let beyond_cutoff_share = polar.share_beyond(bearing_cutoff_rad);
    NavCues {
        polar,
        beyond_cutoff_share,
    }
}
