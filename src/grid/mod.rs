//! Persistent world occupancy map.
//!
//! - [`WorldMap`]: square grid with three per-cell confidence channels
//! - [`update`]: per-tick accumulation of classified observations

mod storage;
pub mod update;

pub use storage::WorldMap;
pub use update::{apply_observation, MapUpdate};
