//! Cells swept by a ball of finite width
//!
//! The shooting-path table only depends on the `BallPath` contract, so a
//! different sweep model can be plugged in without touching the grid.

use geo::{Intersects, Line, LineString, Polygon};
use glam::Vec2;

use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;

/// Computes the ordered cells a ball crosses between two cell centres
///
/// Implementations must be deterministic: the persisted shot table is only
/// valid if the same inputs always give the same path.
pub trait BallPath: Sync {
    /// Path from `from` (excluded) to `to` (included), or empty if the ball
    /// cannot travel there
    fn thick_path(&self, grid: &Grid, from: HexCoord, to: HexCoord, radius: f32) -> Vec<HexCoord>;
}

/// Sweeps a rectangle of half-width `radius` along the centre line
///
/// A cell is on the path when its outline touches the rectangle. Any swept
/// cell outside the pitch (other than a goal cell) blocks the ball.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweptCorridor;

enum Corridor {
    Line(Line<f64>),
    Band(Polygon<f64>),
}

impl Corridor {
    fn new(start: Vec2, end: Vec2, radius: f32) -> Self {
        let to_geo = |v: Vec2| (v.x as f64, v.y as f64);

        if radius <= 0.0 {
            return Corridor::Line(Line::new(to_geo(start), to_geo(end)));
        }

        let normal = (end - start).normalize_or_zero().perp() * radius;
        let ring = vec![
            to_geo(start + normal),
            to_geo(end + normal),
            to_geo(end - normal),
            to_geo(start - normal),
        ];
        Corridor::Band(Polygon::new(LineString::from(ring), vec![]))
    }

    fn hits(&self, outline: &Polygon<f64>) -> bool {
        match self {
            Corridor::Line(line) => line.intersects(outline),
            Corridor::Band(band) => band.intersects(outline),
        }
    }
}

/// Distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl BallPath for SweptCorridor {
    fn thick_path(&self, grid: &Grid, from: HexCoord, to: HexCoord, radius: f32) -> Vec<HexCoord> {
        if from == to {
            return Vec::new();
        }
        let (Some(start_cell), Some(end_cell)) = (grid.cell(from), grid.cell(to)) else {
            tracing::debug!("Thick path between missing cells {} -> {}", from, to);
            return Vec::new();
        };
        if !end_cell.is_traversable() {
            return Vec::new();
        }

        let start = start_cell.position;
        let end = end_cell.position;
        let direction = (end - start).normalize_or_zero();
        let corridor = Corridor::new(start, end, radius);

        // Nothing further than a circumradius from the band can touch it
        let reach = radius + grid.config().hex_radius;

        let mut swept: Vec<(f32, HexCoord)> = Vec::new();
        for coord in grid.hexes_in_range(from, from.distance(&to) + 1) {
            if coord == from || coord == to {
                continue;
            }
            let Some(cell) = grid.cell(coord) else {
                continue;
            };
            if distance_to_segment(cell.position, start, end) > reach {
                continue;
            }
            if !corridor.hits(&cell.polygon()) {
                continue;
            }
            if !cell.is_traversable() {
                return Vec::new();
            }
            swept.push(((cell.position - start).dot(direction), coord));
        }

        swept.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut path: Vec<HexCoord> = swept.into_iter().map(|(_, coord)| coord).collect();
        path.push(to);
        path
    }
}
