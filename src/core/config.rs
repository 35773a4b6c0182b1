//! Pitch configuration with documented defaults
//!
//! Everything a grid build or a shot-table build depends on is collected here.
//! The values that change the geometry also feed the shot-table layout
//! fingerprint, so editing them invalidates any persisted table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{PitchError, Result};

/// Configuration for grid construction and shooting-path precomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    // === GRID ===
    /// Number of columns. Columns run from -width/2 to width/2 - 1.
    pub width: u32,

    /// Number of rows. Rows run from -height/2 to height/2 - 1.
    pub height: u32,

    /// Distance from a hex centre to any corner (world units)
    ///
    /// Flat-topped hexes are `2 * hex_radius` wide and
    /// `sqrt(3) * hex_radius` tall.
    pub hex_radius: f32,

    // === SHOOTING ===
    /// Half-width of the corridor a shot sweeps (world units)
    pub ball_radius: f32,

    /// Longest shot, in hexes, that gets a precomputed path
    pub max_shot_distance: u32,

    /// Longest header, in hexes. Heading paths are a subset of shooting paths.
    pub max_heading_distance: u32,

    /// Compute origins across the rayon pool
    pub parallel: bool,

    /// Where the shooting-path table is persisted
    pub shot_table_path: PathBuf,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 36,
            hex_radius: 0.5,

            ball_radius: 0.1,
            max_shot_distance: 11,
            max_heading_distance: 4,

            parallel: true,
            shot_table_path: PathBuf::from("data/shooting_paths.json"),
        }
    }
}

impl PitchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: PitchConfig = toml::from_str(&contents)?;
        config.validate().map_err(PitchError::Config)?;
        tracing::debug!("Loaded pitch config from {:?}", path);
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width < 2 || self.height < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            ));
        }

        // Odd sizes would make the coordinate range asymmetric
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(format!(
                "grid dimensions must be even, got {}x{}",
                self.width, self.height
            ));
        }

        if self.hex_radius <= 0.0 {
            return Err(format!("hex_radius must be positive, got {}", self.hex_radius));
        }

        if self.ball_radius < 0.0 || self.ball_radius >= self.hex_radius {
            return Err(format!(
                "ball_radius ({}) must be in [0, hex_radius ({}))",
                self.ball_radius, self.hex_radius
            ));
        }

        if self.max_heading_distance > self.max_shot_distance {
            return Err(format!(
                "max_heading_distance ({}) should be <= max_shot_distance ({})",
                self.max_heading_distance, self.max_shot_distance
            ));
        }

        Ok(())
    }

    /// Horizontal extent of one flat-topped hex
    pub fn hex_width(&self) -> f32 {
        self.hex_radius * 2.0
    }

    /// Vertical extent of one flat-topped hex
    pub fn hex_height(&self) -> f32 {
        self.hex_radius * 3.0_f32.sqrt()
    }
}
