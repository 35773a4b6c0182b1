//! Breadth-first movement over the pitch
//!
//! Every step costs one hex, so BFS gives shortest paths. Occupied cells are
//! never expanded. Neighbors are visited in direction-table order, so ties
//! always break the same way.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;

/// Find the shortest hop path from `start` to `target`
///
/// The path excludes `start` and ends at `target`. Returns an empty path when
/// the target is unreachable or equal to the start. An occupied target is
/// only entered when `allow_occupied_target` is set (e.g. a tackle).
pub fn find_path(
    grid: &Grid,
    start: HexCoord,
    target: HexCoord,
    allow_occupied_target: bool,
) -> Vec<HexCoord> {
    if start == target {
        return Vec::new();
    }
    if grid.cell(start).is_none() {
        tracing::debug!("Pathfinding from missing cell {}", start);
        return Vec::new();
    }
    let Some(target_cell) = grid.cell(target) else {
        tracing::debug!("Pathfinding to missing cell {}", target);
        return Vec::new();
    };
    if target_cell.is_occupied() && !allow_occupied_target {
        return Vec::new();
    }

    let mut frontier = VecDeque::from([start]);
    let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();
    let mut visited: AHashSet<HexCoord> = AHashSet::from_iter([start]);

    while let Some(current) = frontier.pop_front() {
        for neighbor in grid.neighbors_of(current) {
            if !visited.insert(neighbor) {
                continue;
            }

            if neighbor == target {
                came_from.insert(neighbor, current);
                return reconstruct_path(&came_from, start, target);
            }

            let occupied = grid.cell(neighbor).is_some_and(|c| c.is_occupied());
            if occupied {
                continue;
            }

            came_from.insert(neighbor, current);
            frontier.push_back(neighbor);
        }
    }

    Vec::new()
}

/// Walk parent pointers back from `target`, excluding `start`
fn reconstruct_path(
    came_from: &AHashMap<HexCoord, HexCoord>,
    start: HexCoord,
    mut current: HexCoord,
) -> Vec<HexCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Cells a token can reach within a hop budget
#[derive(Debug, Clone, Default)]
pub struct Reachable {
    /// Reached cells in BFS order, origin first
    pub cells: Vec<HexCoord>,
    /// Shortest hop count to each reached cell
    pub distances: AHashMap<HexCoord, u32>,
}

impl Reachable {
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.distances.contains_key(&coord)
    }

    pub fn distance_to(&self, coord: HexCoord) -> Option<u32> {
        self.distances.get(&coord).copied()
    }
}

/// BFS flood from `origin` up to `range` hops, avoiding occupied cells
///
/// The origin is always included at distance 0, even when the moving token
/// stands on it.
pub fn reachable(grid: &Grid, origin: HexCoord, range: u32) -> Reachable {
    let mut result = Reachable::default();
    if grid.cell(origin).is_none() {
        return result;
    }

    result.cells.push(origin);
    result.distances.insert(origin, 0);

    let mut frontier = VecDeque::from([origin]);
    while let Some(current) = frontier.pop_front() {
        let distance = result.distances[&current];
        if distance >= range {
            continue;
        }

        for neighbor in grid.neighbors_of(current) {
            if result.distances.contains_key(&neighbor) {
                continue;
            }
            if grid.cell(neighbor).is_some_and(|c| c.is_occupied()) {
                continue;
            }

            result.distances.insert(neighbor, distance + 1);
            result.cells.push(neighbor);
            frontier.push_back(neighbor);
        }
    }

    result
}
