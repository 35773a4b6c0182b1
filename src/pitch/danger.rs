//! Interception risk for passes and shots, and goalkeeper reach

use ahash::AHashSet;

use crate::pitch::constants::GOALKEEPER_SAVE_REACH;
use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;

/// Cells a defender can intercept in: their own cell plus every neighbor
pub fn defender_zone_of_influence(grid: &Grid) -> AHashSet<HexCoord> {
    let mut zone = AHashSet::new();
    for cell in grid.cells().filter(|c| c.is_defender_occupied()) {
        zone.insert(cell.coord);
        zone.extend(cell.neighbors(grid));
    }
    zone
}

/// Does a pass along `path` cross a defender's zone without cover?
///
/// A cell is covered when an attacker already stands on it. Goalkeeper
/// passes are only at risk at the receiving cell.
pub fn is_path_dangerous(
    grid: &Grid,
    path: &[HexCoord],
    zone: &AHashSet<HexCoord>,
    goalkeeper_pass: bool,
) -> bool {
    if zone.is_empty() {
        return false;
    }

    let exposed = |coord: &HexCoord| {
        zone.contains(coord)
            && !grid
                .cell(*coord)
                .is_some_and(|c| c.is_attacker_occupied())
    };

    if goalkeeper_pass {
        path.last().is_some_and(exposed)
    } else {
        path.iter().any(exposed)
    }
}

/// Cells the goalkeeper can cover: their own plus three each way along the
/// column, ordered by row
pub fn savable_hexes(grid: &Grid, goalkeeper: HexCoord) -> Vec<HexCoord> {
    (-GOALKEEPER_SAVE_REACH..=GOALKEEPER_SAVE_REACH)
        .map(|dz| HexCoord::new(goalkeeper.x, goalkeeper.z + dz))
        .filter(|coord| grid.contains(*coord))
        .collect()
}
