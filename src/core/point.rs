//! Point types: rover-centric point sets and world-grid coordinates.

use serde::{Deserialize, Serialize};

/// World-grid cell coordinate (integer cell indices).
///
/// Produced by the rover→world transform, which clips both components
/// into `[0, world_size - 1]`, so coordinates handed to the map are
/// always in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A set of rover-centric points in SoA (Struct of Arrays) layout.
///
/// The rover frame has its origin at the vehicle's bottom-center in the
/// rectified view: `xs` holds forward coordinates (increasing away from
/// the vehicle), `ys` holds lateral coordinates (positive left).
#[derive(Clone, Debug, Default)]
pub struct RoverPoints {
    /// Forward coordinates.
    pub xs: Vec<f32>,
    /// Lateral coordinates.
    pub ys: Vec<f32>,
}

impl RoverPoints {
    /// Create an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty point set with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    /// Add a point.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32) {
        self.xs.push(x);
        self.ys.push(y);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Minimum forward coordinate (the closest point to the vehicle).
    ///
    /// Returns `None` for an empty set.
    pub fn min_forward(&self) -> Option<f32> {
        self.xs.iter().copied().reduce(f32::min)
    }

    /// Mean lateral coordinate.
    ///
    /// Returns `None` for an empty set.
    pub fn mean_lateral(&self) -> Option<f32> {
        if self.ys.is_empty() {
            None
        } else {
            Some(self.ys.iter().sum::<f32>() / self.ys.len() as f32)
        }
    }
}
