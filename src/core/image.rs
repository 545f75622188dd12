//! Image buffer types: color frames and binary masks.
//!
//! Both types are row-major, heap-allocated, runtime-sized containers.
//! Pixel (row, col) of an [`RgbFrame`] lives at `(row * width + col) * 3`;
//! cell (row, col) of a [`BinaryMask`] lives at `row * width + col`.

use crate::error::{DrishtiError, Result};

/// A 3-channel color image, one byte per channel.
///
/// Frames are ephemeral: the pipeline reads one per tick and writes one
/// as the debug overlay. The buffer layout matches what camera and
/// simulator collaborators typically hand over (interleaved RGB).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbFrame {
    /// Create an all-black frame of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height * 3],
            width,
            height,
        }
    }

    /// Wrap an existing interleaved RGB buffer.
    ///
    /// Fails if the buffer length does not match `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(DrishtiError::FrameSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a frame filled with a uniform color.
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        let mut frame = Self::new(width, height);
        for px in frame.data.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
        frame
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the pixel at (row, col).
    ///
    /// # Panics
    /// Panics if (row, col) is outside the frame.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [u8; 3] {
        debug_assert!(row < self.height && col < self.width);
        let i = (row * self.width + col) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Set the pixel at (row, col).
    ///
    /// # Panics
    /// Panics if (row, col) is outside the frame.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, px: [u8; 3]) {
        debug_assert!(row < self.height && col < self.width);
        let i = (row * self.width + col) * 3;
        self.data[i..i + 3].copy_from_slice(&px);
    }

    /// Set a single channel of the pixel at (row, col).
    #[inline]
    pub fn set_channel(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        debug_assert!(row < self.height && col < self.width && channel < 3);
        self.data[(row * self.width + col) * 3 + channel] = value;
    }

    /// Raw interleaved buffer.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

/// A boolean grid stored as one byte per cell, values constrained to {0, 1}.
///
/// Used for the rectification validity mask and for all class masks
/// (navigable / obstacle / sample).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl BinaryMask {
    /// Create an all-zero mask of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height],
            width,
            height,
        }
    }

    /// Mask width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (row, col): 0 or 1.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        debug_assert!(row < self.height && col < self.width);
        self.data[row * self.width + col]
    }

    /// Check whether the cell at (row, col) is set.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != 0
    }

    /// Set the cell at (row, col). Any non-zero value is stored as 1.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(row < self.height && col < self.width);
        self.data[row * self.width + col] = (value != 0) as u8;
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Check whether any cell is set.
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v != 0)
    }

    /// Iterate over the (row, col) coordinates of all set cells,
    /// in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Raw cell buffer.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}
