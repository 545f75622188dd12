//! Coordinate transforms: pixel space → rover frame → polar / world grid.
//!
//! The rover frame places the origin at the bottom-center of the
//! rectified view, matching the vehicle's physical reference point:
//! forward `x = height - row`, lateral `y = width / 2 - col` (positive
//! left). World mapping rotates by the vehicle yaw, scales rectified
//! pixels down to world units, translates by the vehicle position, and
//! finally clips into the grid. That order is load-bearing: translating
//! before scaling would mix units, and clipping must come last so
//! intermediate overflow cannot discard in-bounds detections.

use crate::core::{BinaryMask, GridCoord, PolarObservation, RoverPoints, RoverPose};

/// Convert the set cells of a class mask to rover-centric coordinates.
pub fn rover_points(mask: &BinaryMask) -> RoverPoints {
    let height = mask.height() as f32;
    let half_width = mask.width() as f32 / 2.0;

    let mut points = RoverPoints::with_capacity(mask.count_set());
    for (row, col) in mask.iter_set() {
        points.push(height - row as f32, half_width - col as f32);
    }
    points
}

/// Convert rover-centric points to polar (distance, bearing).
///
/// Bearings are `atan2(lateral, forward)`: signed radians relative to
/// the forward heading, CCW positive, in `(-π, π]`.
pub fn to_polar(points: &RoverPoints) -> PolarObservation {
    let mut polar = PolarObservation::with_capacity(points.len());
    for (&x, &y) in points.xs.iter().zip(points.ys.iter()) {
        polar.push((x * x + y * y).sqrt(), y.atan2(x));
    }
    polar
}

/// Rotate a rover-frame point by the vehicle yaw (standard 2D CCW
/// rotation).
#[inline]
pub fn rotate(x: f32, y: f32, yaw_rad: f32) -> (f32, f32) {
    let (sin, cos) = yaw_rad.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Map a single rover-frame point into the world grid.
///
/// `scale` is rectified pixels per world unit; `world_size` is the grid
/// side length. Both output components are truncated to integers and
/// clipped into `[0, world_size - 1]`.
pub fn point_to_world(
    x: f32,
    y: f32,
    pose: RoverPose,
    scale: f32,
    world_size: usize,
) -> GridCoord {
    let (xr, yr) = rotate(x, y, pose.yaw_rad());
    let wx = pose.x + xr / scale;
    let wy = pose.y + yr / scale;

    let max = (world_size - 1) as i32;
    GridCoord::new(
        (wx as i32).clamp(0, max),
        (wy as i32).clamp(0, max),
    )
}

/// Map a rover-frame point set into world-grid coordinates.
pub fn points_to_world(
    points: &RoverPoints,
    pose: RoverPose,
    scale: f32,
    world_size: usize,
) -> Vec<GridCoord> {
    points
        .xs
        .iter()
        .zip(points.ys.iter())
        .map(|(&x, &y)| point_to_world(x, y, pose, scale, world_size))
        .collect()
}
