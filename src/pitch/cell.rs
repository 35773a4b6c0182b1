//! A single hex cell on the pitch
//!
//! Cells never hold a reference back to the grid. Anything that needs the
//! surrounding cells takes the owning `Grid` explicitly.

use ahash::AHashMap;
use geo::{LineString, Polygon};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{FieldSide, Occupant};
use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;

/// Static classification of a cell, fixed at grid build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellFlags {
    pub out_of_bounds: bool,
    /// Side whose penalty box contains the cell, 0 if none
    pub penalty_box: FieldSide,
    pub final_third: FieldSide,
    pub in_goal: FieldSide,
    pub in_circle: bool,
    pub difficult_shot: bool,
    pub kickoff: bool,
    /// Cosmetic tiling only
    pub dark: bool,
}

/// A single hex on the pitch
#[derive(Debug, Clone)]
pub struct Cell {
    pub coord: HexCoord,
    /// Centre in world units
    pub position: Vec2,
    pub radius: f32,
    pub flags: CellFlags,
    pub(crate) occupant: Occupant,
    pub(crate) can_shoot_from: bool,
    pub(crate) shooting_paths: AHashMap<HexCoord, Vec<HexCoord>>,
    pub(crate) heading_paths: AHashMap<HexCoord, Vec<HexCoord>>,
}

impl Cell {
    pub fn new(coord: HexCoord, position: Vec2, radius: f32, flags: CellFlags) -> Self {
        Self {
            coord,
            position,
            radius,
            flags,
            occupant: Occupant::Empty,
            can_shoot_from: false,
            shooting_paths: AHashMap::new(),
            heading_paths: AHashMap::new(),
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.flags.out_of_bounds
    }

    pub fn is_in_goal(&self) -> bool {
        self.flags.in_goal != 0
    }

    pub fn penalty_box(&self) -> FieldSide {
        self.flags.penalty_box
    }

    pub fn final_third(&self) -> FieldSide {
        self.flags.final_third
    }

    pub fn is_kickoff(&self) -> bool {
        self.flags.kickoff
    }

    pub fn is_difficult_shot(&self) -> bool {
        self.flags.difficult_shot
    }

    /// Can a token or the ball enter this cell at all?
    pub fn is_traversable(&self) -> bool {
        !self.flags.out_of_bounds || self.is_in_goal()
    }

    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    pub fn is_attacker_occupied(&self) -> bool {
        matches!(self.occupant, Occupant::Attacker(_))
    }

    pub fn is_defender_occupied(&self) -> bool {
        matches!(self.occupant, Occupant::Defender(_))
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupant.is_empty()
    }

    pub fn can_shoot_from(&self) -> bool {
        self.can_shoot_from
    }

    /// Precomputed path to a goal-mouth cell, if the shot is open
    pub fn shooting_path(&self, destination: HexCoord) -> Option<&[HexCoord]> {
        self.shooting_paths.get(&destination).map(Vec::as_slice)
    }

    pub fn shooting_paths(&self) -> &AHashMap<HexCoord, Vec<HexCoord>> {
        &self.shooting_paths
    }

    pub fn heading_path(&self, destination: HexCoord) -> Option<&[HexCoord]> {
        self.heading_paths.get(&destination).map(Vec::as_slice)
    }

    pub fn heading_paths(&self) -> &AHashMap<HexCoord, Vec<HexCoord>> {
        &self.heading_paths
    }

    /// Adjacent cells a token or the ball may move into
    ///
    /// Out-of-bounds neighbors are skipped unless they are inside a goal.
    pub fn neighbors(&self, grid: &Grid) -> Vec<HexCoord> {
        self.coord
            .neighbor_coords()
            .into_iter()
            .filter(|n| grid.cell(*n).is_some_and(Cell::is_traversable))
            .collect()
    }

    /// Corner positions of the flat-topped hex
    pub fn corners(&self) -> [Vec2; 6] {
        std::array::from_fn(|i| {
            // 30° start, 60° steps, turned 90° for the flat-topped layout
            let angle = (30.0 + 60.0 * i as f32 + 90.0).to_radians();
            self.position + Vec2::new(angle.cos(), angle.sin()) * self.radius
        })
    }

    /// Midpoints of each edge; edge `i` joins corners `i` and `i + 1`
    pub fn edge_midpoints(&self) -> [Vec2; 6] {
        let corners = self.corners();
        std::array::from_fn(|i| (corners[i] + corners[(i + 1) % 6]) * 0.5)
    }

    /// Outline as a closed polygon for intersection tests
    pub fn polygon(&self) -> Polygon<f64> {
        let ring: Vec<(f64, f64)> = self
            .corners()
            .iter()
            .map(|c| (c.x as f64, c.y as f64))
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    pub(crate) fn set_occupant(&mut self, occupant: Occupant) {
        self.occupant = occupant;
    }

    pub(crate) fn set_shooting_paths(&mut self, paths: AHashMap<HexCoord, Vec<HexCoord>>) {
        self.can_shoot_from = !paths.is_empty();
        self.shooting_paths = paths;
    }

    pub(crate) fn set_heading_paths(&mut self, paths: AHashMap<HexCoord, Vec<HexCoord>>) {
        self.heading_paths = paths;
    }
}
