//! Error types for drishti-map.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum DrishtiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("frame buffer holds {actual} bytes, expected {expected} for {width}x{height}x3")]
    FrameSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("frame is {actual_width}x{actual_height}, calibration expects {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("degenerate point correspondences: homography system is singular")]
    DegenerateHomography,
}

impl From<serde_yaml::Error> for DrishtiError {
    fn from(e: serde_yaml::Error) -> Self {
        DrishtiError::Config(e.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DrishtiError>;
