//! Hex coordinate systems for the pitch (odd-q offset, axial and cube)
//!
//! Cells are addressed by offset coordinates (column `x`, row `z`) where odd
//! columns sit half a hex lower. Distances and ranges are computed in cube
//! space, where `x + y + z == 0` always holds.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::PitchError;
use crate::core::types::FieldSide;

/// Neighbor deltas (dx, dz) for even columns
pub const EVEN_COLUMN_DIRECTIONS: [(i32, i32); 6] =
    [(0, -1), (-1, -1), (-1, 0), (0, 1), (1, 0), (1, -1)];

/// Neighbor deltas (dx, dz) for odd columns
pub const ODD_COLUMN_DIRECTIONS: [(i32, i32); 6] =
    [(0, -1), (-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0)];

/// Offset hex coordinate (odd-q layout)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub x: i32, // Column
    pub z: i32, // Row
}

/// Cube hex coordinate, `x + y + z == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Axial hex coordinate (cube without the redundant y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn is_odd_column(&self) -> bool {
        self.x & 1 == 1
    }

    /// -1 for the left half, 1 for the right half, 0 on the halfway column
    pub fn field_side(&self) -> FieldSide {
        self.x.signum() as FieldSide
    }

    pub fn to_cube(&self) -> CubeCoord {
        offset_to_cube(self.x, self.z)
    }

    pub fn from_cube(cube: CubeCoord) -> Self {
        cube_to_offset(cube)
    }

    pub fn to_axial(&self) -> AxialCoord {
        cube_to_axial(self.to_cube())
    }

    /// Distance in hex steps
    pub fn distance(&self, other: &Self) -> u32 {
        hex_distance(self.to_cube(), other.to_cube())
    }

    /// Direction table for this coordinate's column parity
    pub fn directions(&self) -> &'static [(i32, i32); 6] {
        if self.is_odd_column() {
            &ODD_COLUMN_DIRECTIONS
        } else {
            &EVEN_COLUMN_DIRECTIONS
        }
    }

    /// The six adjacent coordinates, in direction-table order
    pub fn neighbor_coords(&self) -> [HexCoord; 6] {
        let directions = *self.directions();
        directions.map(|(dx, dz)| HexCoord::new(self.x + dx, self.z + dz))
    }

    /// Centre of this hex in world units
    pub fn world_position(&self, hex_width: f32, hex_height: f32) -> Vec2 {
        let x = self.x as f32 * 0.75 * hex_width;
        let mut z = self.z as f32 * hex_height;
        if self.is_odd_column() {
            z += hex_height / 2.0;
        }
        Vec2::new(x, z)
    }
}

/// Offset (column, row) to cube
#[inline]
pub fn offset_to_cube(col: i32, row: i32) -> CubeCoord {
    let x = col;
    let z = row - (col - (col & 1)) / 2;
    let y = -x - z;
    CubeCoord { x, y, z }
}

/// Cube to offset (column, row); exact inverse of `offset_to_cube`
#[inline]
pub fn cube_to_offset(cube: CubeCoord) -> HexCoord {
    let col = cube.x;
    let row = cube.z + (cube.x - (cube.x & 1)) / 2;
    HexCoord::new(col, row)
}

#[inline]
pub fn axial_to_cube(axial: AxialCoord) -> CubeCoord {
    CubeCoord {
        x: axial.q,
        y: -axial.q - axial.r,
        z: axial.r,
    }
}

#[inline]
pub fn cube_to_axial(cube: CubeCoord) -> AxialCoord {
    AxialCoord {
        q: cube.x,
        r: cube.z,
    }
}

/// max(|dx|, |dy|, |dz|)
#[inline]
pub fn hex_distance(a: CubeCoord, b: CubeCoord) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let dz = (a.z - b.z).unsigned_abs();
    dx.max(dy).max(dz)
}

/// Largest range `cube_range` enumerates; `2 * MAX_CUBE_RANGE` fits in `i32`
pub const MAX_CUBE_RANGE: u32 = (i32::MAX / 2) as u32;

/// Number of hexes within `range` of a hex, saturating at `usize::MAX`
pub fn cube_range_len(range: u32) -> usize {
    let n = range as usize;
    n.saturating_add(1)
        .saturating_mul(n)
        .saturating_mul(3)
        .saturating_add(1)
}

/// Every cube delta within `range` of the origin, origin first
///
/// Ranges above `MAX_CUBE_RANGE` are treated as `MAX_CUBE_RANGE`. Callers
/// bounded by a grid should clamp to the grid extent first.
pub fn cube_range(range: u32) -> Vec<CubeCoord> {
    let range = range.min(MAX_CUBE_RANGE);
    let n = range as i32;
    let mut results = Vec::with_capacity(cube_range_len(range).min(1 << 16));
    results.push(CubeCoord::default());
    for dx in -n..=n {
        for dy in (-n).max(-dx - n)..=n.min(-dx + n) {
            let delta = CubeCoord {
                x: dx,
                y: dy,
                z: -dx - dy,
            };
            if delta != CubeCoord::default() {
                results.push(delta);
            }
        }
    }
    results
}

impl CubeCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for CubeCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for CubeCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Rendered as `(x, 0, z)`; this is also the persisted key format
impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, 0, {})", self.x, self.z)
    }
}

impl FromStr for HexCoord {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PitchError::InvalidCoordinate(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [x, _y, z] = parts.as_slice() else {
            return Err(invalid());
        };

        // Components may be float-formatted, e.g. `3.0`
        let parse = |v: &str| -> Result<i32, PitchError> {
            if let Ok(n) = v.parse::<i32>() {
                return Ok(n);
            }
            let f: f32 = v.parse().map_err(|_| invalid())?;
            if f.fract() != 0.0 {
                return Err(invalid());
            }
            Ok(f as i32)
        };

        Ok(HexCoord::new(parse(*x)?, parse(*z)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_cube() {
        assert_eq!(HexCoord::ORIGIN.to_cube(), CubeCoord::new(0, 0, 0));
    }

    #[test]
    fn test_negative_odd_column_round_trip() {
        let coord = HexCoord::new(-19, -4);
        assert!(coord.is_odd_column());
        assert_eq!(HexCoord::from_cube(coord.to_cube()), coord);
    }

    #[test]
    fn test_axial_round_trip() {
        let coord = HexCoord::new(7, -3);
        let cube = coord.to_cube();
        assert_eq!(axial_to_cube(coord.to_axial()), cube);
    }

    #[test]
    fn test_distance_along_column() {
        let a = HexCoord::new(4, -3);
        let b = HexCoord::new(4, 5);
        assert_eq!(a.distance(&b), 8);
    }

    #[test]
    fn test_distance_across_columns() {
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(3, -1)), 3);
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(1, 0)), 1);
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(1, 1)), 2);
    }

    #[test]
    fn test_neighbors_are_adjacent_both_parities() {
        for coord in [HexCoord::new(2, 3), HexCoord::new(3, 3), HexCoord::new(-5, -2)] {
            let neighbors = coord.neighbor_coords();
            for n in neighbors {
                assert_eq!(coord.distance(&n), 1, "{} -> {}", coord, n);
            }
        }
    }

    #[test]
    fn test_cube_range_sizes() {
        assert_eq!(cube_range(0).len(), 1);
        assert_eq!(cube_range(1).len(), 7);
        assert_eq!(cube_range(2).len(), 19);
        assert_eq!(cube_range(0)[0], CubeCoord::default());
        assert_eq!(cube_range_len(2), 19);
    }

    #[test]
    fn test_cube_range_len_saturates() {
        assert_eq!(cube_range_len(u32::MAX), usize::MAX);
        assert_eq!(cube_range_len(30_000), 3 * 30_000 * 30_001 + 1);
    }

    #[test]
    fn test_world_position_odd_column_shift() {
        let even = HexCoord::new(2, 0).world_position(1.0, 0.8);
        let odd = HexCoord::new(3, 0).world_position(1.0, 0.8);
        assert!((even.x - 1.5).abs() < 1e-6);
        assert!((even.y - 0.0).abs() < 1e-6);
        assert!((odd.x - 2.25).abs() < 1e-6);
        assert!((odd.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_display_and_parse() {
        let coord = HexCoord::new(-12, 7);
        assert_eq!(coord.to_string(), "(-12, 0, 7)");
        assert_eq!("(-12, 0, 7)".parse::<HexCoord>().unwrap(), coord);
        assert_eq!("(3.0, 0.0, -4.0)".parse::<HexCoord>().unwrap(), HexCoord::new(3, -4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("3, 0, 4".parse::<HexCoord>().is_err());
        assert!("(3, 4)".parse::<HexCoord>().is_err());
        assert!("(a, 0, 4)".parse::<HexCoord>().is_err());
        assert!("(1.5, 0, 4)".parse::<HexCoord>().is_err());
    }

    #[test]
    fn test_field_side() {
        assert_eq!(HexCoord::new(-8, 0).field_side(), -1);
        assert_eq!(HexCoord::new(0, 3).field_side(), 0);
        assert_eq!(HexCoord::new(19, -4).field_side(), 1);
    }
}
