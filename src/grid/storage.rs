//! World map storage.
//!
//! Uses Structure-of-Arrays layout: each confidence channel lives in
//! its own contiguous array, so per-channel passes (accumulation, the
//! navigable-wins sweep, rendering) stream over one array at a time.

use crate::core::GridCoord;

/// The persistent occupancy map: a square S×S grid with three
/// independent non-negative confidence channels per cell.
///
/// Channels are counters accumulated over ticks, representing
/// evidential weight for each class:
/// - **obstacle**: not-navigable observations
/// - **sample**: target object markers
/// - **navigable**: traversable-ground observations
///
/// Created once at vehicle start, mutated once per tick by
/// [`apply_observation`](crate::grid::apply_observation), never
/// destroyed during a run. Channel values only grow, with one
/// exception: the navigable-wins rule resets a cell's obstacle
/// confidence once its navigable confidence passes the cutover.
///
/// Cell (x, y) addresses column x, row y; all coordinates handed to
/// the map are expected pre-clipped to `[0, S - 1]` by the transform
/// stage, and out-of-bounds coordinates are ignored rather than
/// written.
#[derive(Clone, Debug)]
pub struct WorldMap {
    size: usize,
    obstacle: Vec<u32>,
    sample: Vec<u32>,
    navigable: Vec<u32>,
}

impl WorldMap {
    /// Create an empty map with `size` cells per side.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            obstacle: vec![0; cells],
            sample: vec![0; cells],
            navigable: vec![0; cells],
        }
    }

    /// Grid side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.size
            && (coord.y as usize) < self.size
        {
            Some(coord.y as usize * self.size + coord.x as usize)
        } else {
            None
        }
    }

    /// Obstacle confidence at a cell (0 if out of bounds).
    #[inline]
    pub fn obstacle_at(&self, coord: GridCoord) -> u32 {
        self.index(coord).map_or(0, |i| self.obstacle[i])
    }

    /// Sample confidence at a cell (0 if out of bounds).
    #[inline]
    pub fn sample_at(&self, coord: GridCoord) -> u32 {
        self.index(coord).map_or(0, |i| self.sample[i])
    }

    /// Navigable confidence at a cell (0 if out of bounds).
    #[inline]
    pub fn navigable_at(&self, coord: GridCoord) -> u32 {
        self.index(coord).map_or(0, |i| self.navigable[i])
    }

    /// Raw obstacle channel, row-major.
    #[inline]
    pub fn obstacle_channel(&self) -> &[u32] {
        &self.obstacle
    }

    /// Raw sample channel, row-major.
    #[inline]
    pub fn sample_channel(&self) -> &[u32] {
        &self.sample
    }

    /// Raw navigable channel, row-major.
    #[inline]
    pub fn navigable_channel(&self) -> &[u32] {
        &self.navigable
    }

    /// Add `weight` to the navigable channel at each coordinate.
    /// Duplicate coordinates accumulate once per occurrence.
    pub fn add_navigable(&mut self, coords: &[GridCoord], weight: u32) {
        for &coord in coords {
            if let Some(i) = self.index(coord) {
                self.navigable[i] += weight;
            }
        }
    }

    /// Add `weight` to the obstacle channel at each coordinate.
    pub fn add_obstacle(&mut self, coords: &[GridCoord], weight: u32) {
        for &coord in coords {
            if let Some(i) = self.index(coord) {
                self.obstacle[i] += weight;
            }
        }
    }

    /// Register a sample marker: add `weight` to all three channels of
    /// one cell. The multi-channel bump makes the target's location
    /// stand out on every rendering of the map.
    pub fn add_sample_marker(&mut self, coord: GridCoord, weight: u32) {
        if let Some(i) = self.index(coord) {
            self.obstacle[i] += weight;
            self.sample[i] += weight;
            self.navigable[i] += weight;
        }
    }

    /// Navigable-wins sweep: reset the obstacle confidence of every
    /// cell whose navigable confidence exceeds `threshold`.
    ///
    /// Runs over the whole map, not just newly-touched cells, restoring
    /// the invariant each tick. There is no symmetric rule in the other
    /// direction: obstacle evidence never suppresses navigable.
    ///
    /// Returns the number of cells whose obstacle confidence was
    /// actually cleared.
    pub fn suppress_overridden_obstacles(&mut self, threshold: u32) -> usize {
        let mut cleared = 0;
        for (obstacle, &navigable) in self.obstacle.iter_mut().zip(self.navigable.iter()) {
            if navigable > threshold && *obstacle != 0 {
                *obstacle = 0;
                cleared += 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_empty() {
        let map = WorldMap::new(200);
        assert_eq!(map.size(), 200);
        assert_eq!(map.cell_count(), 40000);
        assert!(map.navigable_channel().iter().all(|&v| v == 0));
        assert!(map.obstacle_channel().iter().all(|&v| v == 0));
        assert!(map.sample_channel().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_accumulation_is_additive() {
        let mut map = WorldMap::new(10);
        let cell = GridCoord::new(3, 7);
        map.add_navigable(&[cell], 2);
        map.add_navigable(&[cell], 2);
        assert_eq!(map.navigable_at(cell), 4);

        // Duplicates within one call also accumulate.
        map.add_obstacle(&[cell, cell, cell], 1);
        assert_eq!(map.obstacle_at(cell), 3);
    }

    #[test]
    fn test_sample_marker_hits_all_channels() {
        let mut map = WorldMap::new(10);
        let cell = GridCoord::new(5, 5);
        map.add_sample_marker(cell, 10);
        assert_eq!(map.obstacle_at(cell), 10);
        assert_eq!(map.sample_at(cell), 10);
        assert_eq!(map.navigable_at(cell), 10);
    }

    #[test]
    fn test_out_of_bounds_writes_ignored() {
        let mut map = WorldMap::new(10);
        map.add_navigable(&[GridCoord::new(-1, 5), GridCoord::new(5, 10)], 2);
        map.add_sample_marker(GridCoord::new(100, 100), 10);
        assert!(map.navigable_channel().iter().all(|&v| v == 0));
        assert!(map.sample_channel().iter().all(|&v| v == 0));
        assert_eq!(map.navigable_at(GridCoord::new(-1, 5)), 0);
    }

    #[test]
    fn test_navigable_wins_threshold_is_strict() {
        let mut map = WorldMap::new(10);
        let cell = GridCoord::new(2, 2);
        map.add_obstacle(&[cell], 3);

        // Exactly at the threshold: obstacle evidence survives.
        map.add_navigable(&[cell; 100], 2);
        assert_eq!(map.navigable_at(cell), 200);
        assert_eq!(map.suppress_overridden_obstacles(200), 0);
        assert_eq!(map.obstacle_at(cell), 3);

        // One more increment crosses it.
        map.add_navigable(&[cell], 2);
        assert_eq!(map.navigable_at(cell), 202);
        assert_eq!(map.suppress_overridden_obstacles(200), 1);
        assert_eq!(map.obstacle_at(cell), 0);
    }

    #[test]
    fn test_navigable_wins_after_101_increments() {
        // The documented cutover scenario: 101 ticks of +2 on one cell.
        let mut map = WorldMap::new(10);
        let cell = GridCoord::new(4, 6);
        map.add_obstacle(&[cell], 7);

        for _ in 0..101 {
            map.add_navigable(&[cell], 2);
            map.suppress_overridden_obstacles(200);
        }

        assert_eq!(map.navigable_at(cell), 202);
        assert_eq!(map.obstacle_at(cell), 0);
    }

    #[test]
    fn test_sweep_never_touches_navigable_or_sample() {
        let mut map = WorldMap::new(10);
        let cell = GridCoord::new(1, 1);
        map.add_navigable(&[cell], 300);
        map.add_sample_marker(cell, 10);
        map.suppress_overridden_obstacles(200);
        assert_eq!(map.navigable_at(cell), 310);
        assert_eq!(map.sample_at(cell), 10);
        assert_eq!(map.obstacle_at(cell), 0);
    }
}
