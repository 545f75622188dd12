//! Per-tick map accumulation.
//!
//! Applies one tick's already-world-transformed observations to the
//! persistent map, in a fixed order:
//!
//! 1. navigable increments
//! 2. navigable-wins sweep over the whole map
//! 3. obstacle increments
//! 4. sample marker, if a sample is in view
//!
//! Obstacle evidence written in step 3 therefore survives until the
//! next tick's sweep, even on cells already past the cutover.

use crate::config::MapConfig;
use crate::core::GridCoord;
use crate::grid::WorldMap;

/// Statistics from one accumulation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapUpdate {
    /// Navigable cell writes this tick (duplicates counted).
    pub navigable_writes: usize,
    /// Obstacle cell writes this tick (duplicates counted).
    pub obstacle_writes: usize,
    /// Cells whose obstacle confidence the sweep cleared.
    pub obstacles_suppressed: usize,
    /// World cell that received the sample marker, if any.
    pub sample_cell: Option<GridCoord>,
}

/// Apply one tick's observations to the map.
///
/// `sample_cell` is the representative world cell of the sample pixel
/// set, or `None` when the sample mask was empty this tick — in which
/// case the sample branch is skipped entirely and no channel is
/// touched by it.
pub fn apply_observation(
    map: &mut WorldMap,
    navigable: &[GridCoord],
    obstacles: &[GridCoord],
    sample_cell: Option<GridCoord>,
    config: &MapConfig,
) -> MapUpdate {
    map.add_navigable(navigable, config.navigable_weight);
    let obstacles_suppressed = map.suppress_overridden_obstacles(config.navigable_override);
    map.add_obstacle(obstacles, config.obstacle_weight);

    if let Some(cell) = sample_cell {
        map.add_sample_marker(cell, config.sample_weight);
    }

    MapUpdate {
        navigable_writes: navigable.len(),
        obstacle_writes: obstacles.len(),
        obstacles_suppressed,
        sample_cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MapConfig {
        MapConfig::default()
    }

    #[test]
    fn test_weights_applied_per_class() {
        let mut map = WorldMap::new(20);
        let nav = GridCoord::new(1, 1);
        let obs = GridCoord::new(2, 2);

        let update = apply_observation(&mut map, &[nav], &[obs], None, &config());

        assert_eq!(map.navigable_at(nav), 2);
        assert_eq!(map.obstacle_at(obs), 1);
        assert_eq!(update.navigable_writes, 1);
        assert_eq!(update.obstacle_writes, 1);
        assert_eq!(update.sample_cell, None);
    }

    #[test]
    fn test_sample_marker_applied_when_present() {
        let mut map = WorldMap::new(20);
        let cell = GridCoord::new(9, 9);

        let update = apply_observation(&mut map, &[], &[], Some(cell), &config());

        assert_eq!(update.sample_cell, Some(cell));
        assert_eq!(map.obstacle_at(cell), 10);
        assert_eq!(map.sample_at(cell), 10);
        assert_eq!(map.navigable_at(cell), 10);
    }

    #[test]
    fn test_empty_sample_touches_nothing() {
        let mut map = WorldMap::new(20);
        apply_observation(&mut map, &[GridCoord::new(0, 0)], &[], None, &config());
        assert!(map.sample_channel().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sweep_runs_before_obstacle_writes() {
        // A cell past the cutover still records obstacle evidence
        // within the same tick; it is cleared on the next tick.
        let mut map = WorldMap::new(20);
        let cell = GridCoord::new(5, 5);
        map.add_navigable(&[cell], 202);

        apply_observation(&mut map, &[], &[cell], None, &config());
        assert_eq!(map.obstacle_at(cell), 1);

        let update = apply_observation(&mut map, &[], &[], None, &config());
        assert_eq!(update.obstacles_suppressed, 1);
        assert_eq!(map.obstacle_at(cell), 0);
    }
}
