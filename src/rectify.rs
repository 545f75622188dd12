//! Perspective rectification: forward camera view to top-down ground plane.
//!
//! A fixed 4-point homography, calibrated once for the camera mount,
//! maps the forward view onto the ground plane. Rectification is an
//! inverse warp: each output pixel is mapped back through the inverse
//! homography and bilinearly sampled from the source frame. Pixels
//! whose inverse projection falls outside the source frame never
//! existed in the camera's field of view; they are recorded in a
//! validity mask so downstream classification can exclude them.

use crate::config::CalibrationConfig;
use crate::core::{BinaryMask, RgbFrame};
use crate::error::{DrishtiError, Result};

/// A 3x3 planar projective transform.
///
/// Stored and solved in f64: the 8x8 correspondence system can be
/// poorly conditioned for near-degenerate quads, and the warp divides
/// by the projective term.
#[derive(Clone, Copy, Debug)]
pub struct Homography {
    m: [[f64; 3]; 3],
}

impl Homography {
    /// Solve the homography mapping each `src[i]` onto `dst[i]`.
    ///
    /// Builds the standard 8-unknown linear system (h33 fixed at 1) and
    /// solves it by Gaussian elimination with partial pivoting. Fails
    /// with [`DrishtiError::DegenerateHomography`] if the system is
    /// singular (collinear or repeated correspondence points).
    pub fn from_correspondences(src: &[[f32; 2]; 4], dst: &[[f32; 2]; 4]) -> Result<Self> {
        // Two equations per correspondence:
        //   u = (h11 x + h12 y + h13) / (h31 x + h32 y + 1)
        //   v = (h21 x + h22 y + h23) / (h31 x + h32 y + 1)
        // rearranged into rows of an 8x8 system A * h = b.
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];
        for i in 0..4 {
            let (x, y) = (src[i][0] as f64, src[i][1] as f64);
            let (u, v) = (dst[i][0] as f64, dst[i][1] as f64);
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y];
            b[2 * i] = u;
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y];
            b[2 * i + 1] = v;
        }

        let h = solve_8x8(&mut a, &mut b).ok_or(DrishtiError::DegenerateHomography)?;
        Ok(Self {
            m: [
                [h[0], h[1], h[2]],
                [h[3], h[4], h[5]],
                [h[6], h[7], 1.0],
            ],
        })
    }

    /// Invert the homography.
    ///
    /// Uses the adjugate over the determinant; a homography solved from
    /// non-degenerate correspondences is always invertible.
    pub fn invert(&self) -> Result<Self> {
        let m = &self.m;
        let cof = [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ];
        let det = m[0][0] * cof[0][0] + m[0][1] * cof[1][0] + m[0][2] * cof[2][0];
        if det.abs() < 1e-12 {
            return Err(DrishtiError::DegenerateHomography);
        }
        let inv_det = 1.0 / det;
        let mut inv = [[0.0f64; 3]; 3];
        for (r, row) in cof.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                inv[r][c] = v * inv_det;
            }
        }
        Ok(Self { m: inv })
    }

    /// Project a point through the homography.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.m;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        (
            (m[0][0] * x + m[0][1] * y + m[0][2]) / w,
            (m[1][0] * x + m[1][1] * y + m[1][2]) / w,
        )
    }
}

/// Solve `A * x = b` for an 8x8 system in place.
///
/// Gaussian elimination with partial pivoting. Returns `None` if a
/// pivot vanishes (singular system).
fn solve_8x8(a: &mut [[f64; 8]; 8], b: &mut [f64; 8]) -> Option<[f64; 8]> {
    const N: usize = 8;
    for col in 0..N {
        // Pick the largest remaining pivot for stability.
        let mut pivot_row = col;
        for row in col + 1..N {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < 1e-10 {
            return None;
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        for row in col + 1..N {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = [0.0f64; N];
    for col in (0..N).rev() {
        let mut sum = b[col];
        for k in col + 1..N {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Some(x)
}

/// Warps forward-view frames into top-down ground-plane views.
///
/// Built once from the camera calibration; the inverse homography is
/// precomputed so per-tick work is a single pass over output pixels.
#[derive(Clone, Debug)]
pub struct PerspectiveRectifier {
    inverse: Homography,
    width: usize,
    height: usize,
}

impl PerspectiveRectifier {
    /// Build a rectifier from the camera calibration.
    pub fn new(calibration: &CalibrationConfig) -> Result<Self> {
        let forward = Homography::from_correspondences(
            &calibration.source_quad,
            &calibration.destination_quad(),
        )?;
        Ok(Self {
            inverse: forward.invert()?,
            width: calibration.frame_width,
            height: calibration.frame_height,
        })
    }

    /// Expected frame width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Expected frame height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rectify a frame into the top-down view.
    ///
    /// Returns the rectified frame (same dimensions as the input) and a
    /// validity mask that is 1 exactly where the rectified pixel
    /// originates from inside the source frame. Invalid pixels are
    /// left black.
    pub fn rectify(&self, frame: &RgbFrame) -> (RgbFrame, BinaryMask) {
        let mut warped = RgbFrame::new(self.width, self.height);
        let mut valid = BinaryMask::new(self.width, self.height);
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;

        for row in 0..self.height {
            for col in 0..self.width {
                let (sx, sy) = self.inverse.apply(col as f64, row as f64);
                if sx >= 0.0 && sx <= max_x && sy >= 0.0 && sy <= max_y {
                    warped.set(row, col, sample_bilinear(frame, sx, sy));
                    valid.set(row, col, 1);
                }
            }
        }
        (warped, valid)
    }
}

/// Bilinearly sample a frame at fractional coordinates.
///
/// Caller guarantees (x, y) lies inside the frame.
#[inline]
fn sample_bilinear(frame: &RgbFrame, x: f64, y: f64) -> [u8; 3] {
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(frame.width() - 1);
    let y1 = (y0 + 1).min(frame.height() - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = frame.get(y0, x0);
    let p10 = frame.get(y0, x1);
    let p01 = frame.get(y1, x0);
    let p11 = frame.get(y1, x1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}
