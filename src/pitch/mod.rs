//! Hex-grid football pitch
//!
//! Offset hex cells classified into pitch regions, movement search over
//! them, and the precomputed table of open shots at goal.

pub mod cell;
pub mod constants;
pub mod danger;
pub mod grid;
pub mod hex;
pub mod motion;
pub mod pathfinding;
pub mod shooting;
pub mod shot_table;
pub mod thick_path;

// Re-exports for convenient access
pub use cell::{Cell, CellFlags};
pub use constants::*;
pub use danger::{defender_zone_of_influence, is_path_dangerous, savable_hexes};
pub use grid::{classify, Grid};
pub use hex::{hex_distance, AxialCoord, CubeCoord, HexCoord};
pub use motion::Motion;
pub use pathfinding::{find_path, reachable, Reachable};
pub use shooting::{
    apply_table, collect_table, compute_shooting_paths, GoalMouth, PathTable, ShootingPaths,
    ShotTableState,
};
pub use shot_table::{layout_fingerprint, ShotTableFile, ShotTableStore};
pub use thick_path::{BallPath, SweptCorridor};
