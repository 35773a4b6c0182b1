//! Time-based movement along a cell path
//!
//! A `Motion` is a pure function of elapsed time. Whoever drives the frame
//! loop asks where the token or ball is; nothing here sleeps or yields.

use glam::Vec2;

use crate::core::error::{PitchError, Result};
use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;

#[derive(Debug, Clone)]
pub struct Motion {
    cells: Vec<HexCoord>,
    waypoints: Vec<Vec2>,
    /// Distance travelled on arrival at each waypoint
    arrivals: Vec<f32>,
    /// World units per second
    speed: f32,
}

impl Motion {
    /// Move through `path` at `speed`; the first cell is the starting point
    pub fn along(grid: &Grid, path: &[HexCoord], speed: f32) -> Result<Self> {
        if speed.is_nan() || speed <= 0.0 {
            return Err(PitchError::Config(format!("motion speed must be positive, got {}", speed)));
        }
        if path.is_empty() {
            return Err(PitchError::Config("motion path is empty".to_string()));
        }

        let waypoints = path
            .iter()
            .map(|c| grid.try_cell(*c).map(|cell| cell.position))
            .collect::<Result<Vec<_>>>()?;

        let mut arrivals = Vec::with_capacity(waypoints.len());
        let mut travelled = 0.0;
        arrivals.push(travelled);
        for pair in waypoints.windows(2) {
            travelled += pair[0].distance(pair[1]);
            arrivals.push(travelled);
        }

        Ok(Self {
            cells: path.to_vec(),
            waypoints,
            arrivals,
            speed,
        })
    }

    pub fn length(&self) -> f32 {
        self.arrivals.last().copied().unwrap_or(0.0)
    }

    /// Seconds until the final cell is reached
    pub fn duration(&self) -> f32 {
        self.length() / self.speed
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed * self.speed >= self.length()
    }

    /// Segment index and fraction along it at `elapsed`
    fn locate(&self, elapsed: f32) -> (usize, f32) {
        let travelled = (elapsed * self.speed).clamp(0.0, self.length());
        let last = self.waypoints.len() - 1;
        if last == 0 {
            return (0, 0.0);
        }

        // First waypoint strictly past the travelled distance ends the segment
        let end = self.arrivals.partition_point(|&a| a <= travelled).min(last);
        let start = end.saturating_sub(1);
        let span = self.arrivals[end] - self.arrivals[start];
        if span <= f32::EPSILON {
            return (start, 1.0);
        }
        (start, (travelled - self.arrivals[start]) / span)
    }

    pub fn position_at(&self, elapsed: f32) -> Vec2 {
        let (segment, t) = self.locate(elapsed);
        match self.waypoints.get(segment + 1) {
            Some(next) => self.waypoints[segment].lerp(*next, t),
            None => self.waypoints[segment],
        }
    }

    /// Cell whose centre is nearest along the path at `elapsed`
    pub fn cell_at(&self, elapsed: f32) -> HexCoord {
        let (segment, t) = self.locate(elapsed);
        let index = if t >= 0.5 { segment + 1 } else { segment };
        self.cells[index.min(self.cells.len() - 1)]
    }
}
