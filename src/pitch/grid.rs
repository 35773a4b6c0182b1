//! The pitch grid: cell arena, classification and occupancy
//!
//! Cells live in a flat array indexed by `(x + width/2) + (z + height/2) * width`.
//! Every slot is filled during construction; lookups outside the rectangle
//! return `None` instead of panicking.

use ahash::AHashMap;

use crate::core::config::PitchConfig;
use crate::core::error::{PitchError, Result};
use crate::core::types::{FieldSide, Occupant, Side, TokenId};
use crate::pitch::cell::{Cell, CellFlags};
use crate::pitch::constants::*;
use crate::pitch::hex::{cube_range, HexCoord};

/// Classify a coordinate against the pitch markings
pub fn classify(coord: HexCoord) -> CellFlags {
    let HexCoord { x, z } = coord;
    let ax = x.abs();
    let side = coord.field_side();
    let odd = coord.is_odd_column();

    let out_of_bounds = ax > MAX_IN_BOUNDS_X
        || if odd {
            z >= ODD_Z_OUT_UPPER || z <= ODD_Z_OUT_LOWER
        } else {
            z >= EVEN_Z_OUT_UPPER || z <= EVEN_Z_OUT_LOWER
        };

    let box_z_end = if odd { ODD_BOX_Z_END } else { EVEN_BOX_Z_END };
    let in_box_window = z >= BOX_Z_MIN && z < box_z_end;

    let zone = |min_x: i32| -> FieldSide {
        if (min_x..=MAX_IN_BOUNDS_X).contains(&ax) && in_box_window {
            side
        } else {
            0
        }
    };

    let in_goal = if ax == GOAL_X && (GOAL_Z_MIN..=GOAL_Z_MAX).contains(&z) {
        side
    } else {
        0
    };

    CellFlags {
        out_of_bounds,
        penalty_box: zone(PENALTY_BOX_X_MIN),
        final_third: zone(FINAL_THIRD_X_MIN),
        in_goal,
        in_circle: coord.distance(&HexCoord::ORIGIN) <= CENTRE_CIRCLE_RADIUS,
        difficult_shot: is_difficult_shot(ax, z),
        kickoff: coord == HexCoord::ORIGIN,
        dark: (x + z).rem_euclid(2) == 0,
    }
}

/// Tight angles near the corner flags
fn is_difficult_shot(ax: i32, z: i32) -> bool {
    match ax {
        18 => z.abs() >= 6,
        17 => z >= 8 || z <= -9,
        16 => z >= 10 || z <= -10,
        15 => z >= 11 || z <= -11,
        14 => z >= 12 || z <= -12,
        _ => false,
    }
}

/// Unchecked row-major offset of `coord`, saturated into `usize`
fn raw_index(coord: HexCoord, width: u32, height: u32) -> usize {
    let (w, h) = (width as i64, height as i64);
    let raw = (coord.x as i64 + w / 2) + (coord.z as i64 + h / 2) * w;
    usize::try_from(raw).unwrap_or(usize::MAX)
}

/// Slot of `coord` in a `width` x `height` arena, `None` outside the rectangle
fn cell_index(coord: HexCoord, width: u32, height: u32) -> Option<usize> {
    let (w, h) = (width as i64, height as i64);
    let ix = coord.x as i64 + w / 2;
    let iz = coord.z as i64 + h / 2;
    if ix < 0 || iz < 0 || ix >= w || iz >= h {
        return None;
    }
    usize::try_from(ix + iz * w).ok()
}

/// Slot for the next cell of a row-major build, after `filled` cells
///
/// Any other slot means the coordinate walk and the index formula disagree.
fn next_slot(coord: HexCoord, width: u32, height: u32, filled: usize) -> Result<usize> {
    match cell_index(coord, width, height) {
        Some(index) if index == filled => Ok(index),
        _ => {
            let index = raw_index(coord, width, height);
            let len = width as usize * height as usize;
            tracing::error!("Computed index {} for {} does not fit {} cells", index, coord, len);
            Err(PitchError::IndexOutOfBounds {
                x: coord.x,
                z: coord.z,
                index,
                len,
            })
        }
    }
}

/// The full pitch
#[derive(Debug, Clone)]
pub struct Grid {
    config: PitchConfig,
    cells: Vec<Cell>,
    tokens: AHashMap<TokenId, HexCoord>,
}

impl Grid {
    /// Build and classify every cell of the rectangle
    pub fn new(config: &PitchConfig) -> Result<Self> {
        config.validate().map_err(PitchError::Config)?;

        let width = config.width as i32;
        let height = config.height as i32;
        let len = config.width as usize * config.height as usize;
        let (hex_width, hex_height) = (config.hex_width(), config.hex_height());

        let mut cells: Vec<Cell> = Vec::with_capacity(len);

        for z in -height / 2..height / 2 {
            for x in -width / 2..width / 2 {
                let coord = HexCoord::new(x, z);
                next_slot(coord, config.width, config.height, cells.len())?;

                let position = coord.world_position(hex_width, hex_height);
                cells.push(Cell::new(coord, position, config.hex_radius, classify(coord)));
            }
        }

        tracing::info!(
            "Built {}x{} pitch ({} in-bounds cells)",
            width,
            height,
            cells.iter().filter(|c| !c.is_out_of_bounds()).count()
        );

        Ok(Self {
            config: config.clone(),
            cells,
            tokens: AHashMap::new(),
        })
    }

    pub fn config(&self) -> &PitchConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    fn index_of(&self, coord: HexCoord) -> Option<usize> {
        cell_index(coord, self.config.width, self.config.height)
    }

    /// Get the cell at a coordinate
    pub fn cell(&self, coord: HexCoord) -> Option<&Cell> {
        self.index_of(coord).and_then(|i| self.cells.get(i))
    }

    pub(crate) fn cell_mut(&mut self, coord: HexCoord) -> Option<&mut Cell> {
        let index = self.index_of(coord)?;
        self.cells.get_mut(index)
    }

    /// Like `cell`, but a miss is an error the caller can propagate
    pub fn try_cell(&self, coord: HexCoord) -> Result<&Cell> {
        self.cell(coord).ok_or_else(|| {
            tracing::debug!("Lookup miss at {}", coord);
            PitchError::CellNotFound(coord)
        })
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index_of(coord).is_some()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Traversable neighbors of a coordinate (empty if it is off the grid)
    pub fn neighbors_of(&self, coord: HexCoord) -> Vec<HexCoord> {
        self.cell(coord)
            .map(|cell| cell.neighbors(self))
            .unwrap_or_default()
    }

    /// All existing cells within `range` hexes, origin first
    ///
    /// `width + height` hexes reach every cell from anywhere on the grid, so
    /// larger ranges are clamped to that.
    pub fn hexes_in_range(&self, origin: HexCoord, range: u32) -> Vec<HexCoord> {
        let center = origin.to_cube();
        let extent = self.config.width.saturating_add(self.config.height);
        cube_range(range.min(extent))
            .into_iter()
            .map(|delta| HexCoord::from_cube(center + delta))
            .filter(|coord| self.contains(*coord))
            .collect()
    }

    /// Cells in `side`'s goal mouth
    pub fn goal_cells(&self, side: FieldSide) -> Vec<HexCoord> {
        self.cells
            .iter()
            .filter(|c| c.flags.in_goal == side && side != 0)
            .map(|c| c.coord)
            .collect()
    }

    // === OCCUPANCY ===

    pub fn token_position(&self, token: TokenId) -> Option<HexCoord> {
        self.tokens.get(&token).copied()
    }

    /// Move a token onto a cell, clearing the cell it stood on before
    ///
    /// A different token already on the target is displaced with a warning.
    pub fn place_token(&mut self, token: TokenId, side: Side, coord: HexCoord) -> Result<()> {
        if !self.contains(coord) {
            tracing::warn!("Token {} cannot be placed off the grid at {}", token, coord);
            return Err(PitchError::CellNotFound(coord));
        }

        if let Some(previous) = self.tokens.remove(&token) {
            if previous != coord {
                self.release(previous, token);
            }
        }

        let Some(cell) = self.cell_mut(coord) else {
            return Err(PitchError::CellNotFound(coord));
        };
        let displaced = cell.occupant().token().filter(|other| *other != token);
        cell.set_occupant(Occupant::of(side, token));

        if let Some(other) = displaced {
            tracing::warn!(
                "Occupancy conflict at {}: token {} displaced by {}",
                coord,
                other,
                token
            );
            self.tokens.remove(&other);
        }

        self.tokens.insert(token, coord);
        Ok(())
    }

    /// Clear a cell on behalf of `token`
    ///
    /// Clears the cell even when `token` is not the owner, after warning.
    pub fn vacate(&mut self, coord: HexCoord, token: TokenId) -> Occupant {
        let Some(cell) = self.cell_mut(coord) else {
            tracing::warn!("Token {} vacating missing cell {}", token, coord);
            return Occupant::Empty;
        };

        let previous = cell.occupant();
        cell.set_occupant(Occupant::Empty);

        match previous.token() {
            Some(owner) if owner == token => {}
            Some(owner) => {
                tracing::warn!("Token {} cleared {} owned by {}", token, coord, owner);
            }
            None => {
                tracing::warn!("Token {} cleared {} which was already empty", token, coord);
            }
        }

        if let Some(owner) = previous.token() {
            if self.tokens.get(&owner) == Some(&coord) {
                self.tokens.remove(&owner);
            }
        }

        previous
    }

    /// Remove every token from the pitch
    pub fn clear_tokens(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_occupant(Occupant::Empty);
        }
        self.tokens.clear();
    }

    /// Clear `token` from a cell it is leaving; leaves other tokens alone
    fn release(&mut self, coord: HexCoord, token: TokenId) {
        if let Some(cell) = self.cell_mut(coord) {
            match cell.occupant().token() {
                Some(owner) if owner == token => cell.set_occupant(Occupant::Empty),
                Some(owner) => {
                    tracing::warn!(
                        "Token {} left {} but the cell belongs to {}",
                        token,
                        coord,
                        owner
                    );
                }
                None => {}
            }
        }
    }
}
