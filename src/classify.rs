//! Pixel classification over the rectified ground-plane view.
//!
//! Three pure, stateless passes:
//! - [`threshold_terrain`]: navigable ground by per-channel lower bound
//! - [`detect_sample`]: the target object by an inclusive color band
//! - [`derive_obstacles`]: everything not navigable, within the valid
//!   region of the warp

use crate::core::{BinaryMask, RgbFrame};

/// Classify navigable terrain: a pixel is navigable iff every channel
/// strictly exceeds its floor threshold.
///
/// Runs over the whole rectified frame; the warp's validity mask is
/// applied downstream in [`derive_obstacles`], not here.
pub fn threshold_terrain(frame: &RgbFrame, floor: [u8; 3]) -> BinaryMask {
    let mut mask = BinaryMask::new(frame.width(), frame.height());
    for row in 0..frame.height() {
        for col in 0..frame.width() {
            let px = frame.get(row, col);
            if px[0] > floor[0] && px[1] > floor[1] && px[2] > floor[2] {
                mask.set(row, col, 1);
            }
        }
    }
    mask
}

/// Detect sample pixels: every channel within an inclusive color band.
pub fn detect_sample(frame: &RgbFrame, lower: [u8; 3], upper: [u8; 3]) -> BinaryMask {
    let mut mask = BinaryMask::new(frame.width(), frame.height());
    for row in 0..frame.height() {
        for col in 0..frame.width() {
            let px = frame.get(row, col);
            let in_band = (0..3).all(|c| px[c] >= lower[c] && px[c] <= upper[c]);
            if in_band {
                mask.set(row, col, 1);
            }
        }
    }
    mask
}

/// Derive the obstacle mask: not-navigable restricted to valid cells.
///
/// Cells outside the validity mask are neither navigable nor obstacle;
/// excluding them here keeps the warp's extrapolated border from being
/// recorded as a false obstacle ring.
pub fn derive_obstacles(navigable: &BinaryMask, validity: &BinaryMask) -> BinaryMask {
    debug_assert_eq!(navigable.width(), validity.width());
    debug_assert_eq!(navigable.height(), validity.height());

    let mut mask = BinaryMask::new(navigable.width(), navigable.height());
    for row in 0..navigable.height() {
        for col in 0..navigable.width() {
            if validity.is_set(row, col) && !navigable.is_set(row, col) {
                mask.set(row, col, 1);
            }
        }
    }
    mask
}
