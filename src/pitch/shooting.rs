//! Precomputed shooting paths from attacking cells into each goal mouth
//!
//! Building the table sweeps a ball corridor for every origin/goal-cell pair,
//! which is too slow to repeat per shot. It is built once, persisted through a
//! `ShotTableStore`, and reattached to the cells on later runs.

use std::collections::BTreeMap;

use ahash::AHashMap;
use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::FieldSide;
use crate::pitch::constants::{GOAL_X, GOAL_Z_MAX, GOAL_Z_MIN, SHOT_ORIGIN_MIN_X};
use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;
use crate::pitch::shot_table::ShotTableStore;
use crate::pitch::thick_path::BallPath;

/// origin -> goal cell -> ordered path
pub type PathTable = BTreeMap<HexCoord, BTreeMap<HexCoord, Vec<HexCoord>>>;

/// Lifecycle of the table within one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotTableState {
    #[default]
    Uninitialized,
    Computing,
    Ready,
}

/// The opening a shot must pass through, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalMouth {
    pub side: FieldSide,
    /// x of the goal line
    pub line_x: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl GoalMouth {
    /// Derive the mouth from the corner goal cells of `side`
    ///
    /// The line sits on the inward-facing corner of the lowest goal cell:
    /// corner 1 (180°) on the right, corner 4 (0°) on the left. Each end uses
    /// its own goal cells, so the two mouths are mirror images of each other.
    pub fn for_side(grid: &Grid, side: FieldSide) -> Option<Self> {
        if side == 0 {
            return None;
        }
        let x = GOAL_X * side as i32;
        let low = grid.cell(HexCoord::new(x, GOAL_Z_MIN))?.corners();
        let high = grid.cell(HexCoord::new(x, GOAL_Z_MAX))?.corners();

        let line_x = if side > 0 { low[1].x } else { low[4].x };
        let z_min = low.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let z_max = high.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

        Some(Self {
            side,
            line_x,
            z_min,
            z_max,
        })
    }

    /// z where the line through two cell centres crosses the goal line
    pub fn crossing(&self, grid: &Grid, from: HexCoord, to: HexCoord) -> Option<f32> {
        let a = grid.cell(from)?.position;
        let b = grid.cell(to)?.position;
        let dx = b.x - a.x;
        if dx.abs() <= f32::EPSILON {
            return None;
        }
        let t = (self.line_x - a.x) / dx;
        Some(a.y + t * (b.y - a.y))
    }

    /// Does the straight shot enter the goal between the posts?
    pub fn admits(&self, grid: &Grid, from: HexCoord, to: HexCoord) -> bool {
        self.crossing(grid, from, to)
            .is_some_and(|z| z >= self.z_min && z <= self.z_max)
    }
}

/// In-bounds cells far enough forward to shoot from
pub fn shot_origins(grid: &Grid) -> Vec<HexCoord> {
    grid.cells()
        .filter(|c| c.coord.x.abs() >= SHOT_ORIGIN_MIN_X && !c.is_out_of_bounds())
        .map(|c| c.coord)
        .collect()
}

/// Every goal-mouth cell on both ends
pub fn shot_targets(grid: &Grid) -> Vec<HexCoord> {
    grid.cells()
        .filter(|c| c.is_in_goal())
        .map(|c| c.coord)
        .collect()
}

/// Open shots from one origin
pub fn origin_paths(
    grid: &Grid,
    ball: &dyn BallPath,
    radius: f32,
    origin: HexCoord,
    targets: &[HexCoord],
    mouths: &[GoalMouth],
) -> BTreeMap<HexCoord, Vec<HexCoord>> {
    let max_distance = grid.config().max_shot_distance;
    let mut paths = BTreeMap::new();

    for &target in targets {
        if origin.field_side() != target.field_side() {
            continue;
        }
        if origin.distance(&target) > max_distance {
            continue;
        }
        let Some(mouth) = mouths.iter().find(|m| m.side == target.field_side()) else {
            continue;
        };
        if !mouth.admits(grid, origin, target) {
            continue;
        }

        let path = ball.thick_path(grid, origin, target, radius);
        if !path.is_empty() {
            paths.insert(target, path);
        }
    }

    paths
}

/// Build the full table; origins run in parallel when configured
pub fn compute_shooting_paths(grid: &Grid, ball: &dyn BallPath, radius: f32) -> PathTable {
    let origins = shot_origins(grid);
    let targets = shot_targets(grid);
    let mouths: Vec<GoalMouth> = [-1, 1]
        .into_iter()
        .filter_map(|side| GoalMouth::for_side(grid, side))
        .collect();

    tracing::info!(
        "Computing shooting paths: {} origins x {} goal cells",
        origins.len(),
        targets.len()
    );

    let compute = |origin: &HexCoord| {
        (
            *origin,
            origin_paths(grid, ball, radius, *origin, &targets, &mouths),
        )
    };

    let rows: Vec<(HexCoord, BTreeMap<HexCoord, Vec<HexCoord>>)> = if grid.config().parallel {
        origins.par_iter().map(compute).collect()
    } else {
        origins.iter().map(compute).collect()
    };

    let table: PathTable = rows
        .into_iter()
        .filter(|(_, paths)| !paths.is_empty())
        .collect();

    tracing::info!(
        "Shooting paths ready: {} origins can shoot, {} paths",
        table.len(),
        table.values().map(BTreeMap::len).sum::<usize>()
    );

    table
}

/// Attach a table to the cells, replacing whatever they held
///
/// Heading paths are rebuilt from the shooting paths. Returns the number of
/// origins that did not resolve to a cell.
pub fn apply_table(grid: &mut Grid, table: &PathTable) -> usize {
    let max_heading = grid.config().max_heading_distance;

    for cell in grid.cells_mut() {
        cell.set_shooting_paths(AHashMap::new());
        cell.set_heading_paths(AHashMap::new());
    }

    let mut dropped = 0;
    for (origin, paths) in table {
        let Some(cell) = grid.cell_mut(*origin) else {
            tracing::warn!("Shooting paths for missing cell {} dropped", origin);
            dropped += 1;
            continue;
        };

        let shooting: AHashMap<HexCoord, Vec<HexCoord>> =
            paths.iter().map(|(k, v)| (*k, v.clone())).collect();
        let heading: AHashMap<HexCoord, Vec<HexCoord>> = shooting
            .iter()
            .filter(|(target, _)| origin.distance(target) <= max_heading)
            .map(|(k, v)| (*k, v.clone()))
            .collect();

        cell.set_shooting_paths(shooting);
        cell.set_heading_paths(heading);
    }

    dropped
}

/// Snapshot of the table currently attached to the cells
pub fn collect_table(grid: &Grid) -> PathTable {
    grid.cells()
        .filter(|c| c.can_shoot_from())
        .map(|c| {
            let paths = c
                .shooting_paths()
                .iter()
                .map(|(k, v)| (*k, v.clone()))
                .collect();
            (c.coord, paths)
        })
        .collect()
}

/// Owns the build-once lifecycle of the shooting-path table
#[derive(Debug, Default)]
pub struct ShootingPaths {
    state: ShotTableState,
}

impl ShootingPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShotTableState {
        self.state
    }

    /// Load the persisted table or compute and persist a new one
    ///
    /// Does nothing once ready unless `force` is set. A persisted table that
    /// fails to load (wrong layout, unreadable) is rebuilt. If saving a
    /// rebuilt table fails, the table is still attached and the state is
    /// `Ready`; the save error is returned for the caller to report.
    pub fn ensure_shot_table(
        &mut self,
        grid: &mut Grid,
        ball: &dyn BallPath,
        store: &ShotTableStore,
        force: bool,
    ) -> Result<()> {
        if self.state == ShotTableState::Ready && !force {
            return Ok(());
        }
        self.state = ShotTableState::Computing;

        let loaded = if !force && store.exists() {
            match store.load(grid) {
                Ok(table) => Some(table),
                Err(e) => {
                    tracing::warn!("Discarding persisted shot table: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let (table, saved) = match loaded {
            Some(table) => {
                tracing::info!("Loaded {} shooting origins from {:?}", table.len(), store.path());
                (table, Ok(()))
            }
            None => {
                let radius = grid.config().ball_radius;
                let table = compute_shooting_paths(grid, ball, radius);
                let saved = store.save(grid, &table);
                (table, saved)
            }
        };

        apply_table(grid, &table);
        self.state = ShotTableState::Ready;
        saved
    }
}
