//! Polar observation type: parallel (distance, bearing) sequences.

/// A set of points in polar coordinates relative to the rover.
///
/// Parallel vectors: `distances[i]` and `angles[i]` describe the same
/// point. Bearings are signed radians relative to the forward axis,
/// CCW positive (left), in `(-π, π]`.
///
/// Recomputed every tick from the navigable pixel set and handed to the
/// external steering collaborator unmodified.
#[derive(Clone, Debug, Default)]
pub struct PolarObservation {
    /// Distances from the rover origin, in rectified-view pixels.
    pub distances: Vec<f32>,
    /// Signed bearings in radians.
    pub angles: Vec<f32>,
}

impl PolarObservation {
    /// Create an empty observation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty observation with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            distances: Vec::with_capacity(capacity),
            angles: Vec::with_capacity(capacity),
        }
    }

    /// Add a point.
    #[inline]
    pub fn push(&mut self, distance: f32, angle: f32) {
        self.distances.push(distance);
        self.angles.push(angle);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the observation is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Fraction of bearings strictly greater than `cutoff` radians.
    ///
    /// NaN for an empty observation (mean over an empty set), which is
    /// propagated rather than masked so the caller sees the fault.
    pub fn share_beyond(&self, cutoff: f32) -> f32 {
        let over = self.angles.iter().filter(|&&a| a > cutoff).count();
        over as f32 / self.angles.len() as f32
    }
}
