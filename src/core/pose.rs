//! Vehicle pose type.

use serde::{Deserialize, Serialize};

/// Vehicle pose in the world frame, supplied by the external vehicle
/// collaborator and immutable within a tick.
///
/// Yaw is kept in degrees because that is the unit the pose source
/// reports; [`RoverPose::yaw_rad`] converts at the point of use.
///
/// A NaN position or yaw is a precondition violation by the caller; it
/// is propagated through the transform chain unmasked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoverPose {
    /// X position in world units.
    pub x: f32,
    /// Y position in world units.
    pub y: f32,
    /// Heading in degrees, CCW positive.
    pub yaw_deg: f32,
}

impl RoverPose {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f32, y: f32, yaw_deg: f32) -> Self {
        Self { x, y, yaw_deg }
    }

    /// Heading in radians.
    #[inline]
    pub fn yaw_rad(self) -> f32 {
        self.yaw_deg.to_radians()
    }
}
