//! On-disk form of the shooting-path table
//!
//! Coordinates are stored as `"(x, y, z)"` strings keyed by origin and then
//! goal cell. The `layout` fingerprint ties a file to the pitch it was built
//! for; a file from a different layout is rejected as a whole.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::config::PitchConfig;
use crate::core::error::{PitchError, Result};
use crate::pitch::constants::RULES_REVISION;
use crate::pitch::grid::Grid;
use crate::pitch::hex::HexCoord;
use crate::pitch::shooting::PathTable;

/// Identifies every input the table depends on
pub fn layout_fingerprint(config: &PitchConfig) -> String {
    format!(
        "{}x{}/hex{}/ball{}/shot{}/rules{}",
        config.width,
        config.height,
        config.hex_radius,
        config.ball_radius,
        config.max_shot_distance,
        RULES_REVISION
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTableFile {
    pub layout: String,
    pub paths: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ShotTableFile {
    pub fn from_table(config: &PitchConfig, table: &PathTable) -> Self {
        let paths = table
            .iter()
            .map(|(origin, targets)| {
                let targets: BTreeMap<String, Vec<String>> = targets
                    .iter()
                    .map(|(target, path)| {
                        (target.to_string(), path.iter().map(HexCoord::to_string).collect())
                    })
                    .collect();
                (origin.to_string(), targets)
            })
            .collect();

        Self {
            layout: layout_fingerprint(config),
            paths,
        }
    }

    /// Resolve every entry against `grid`
    ///
    /// Fails on a layout mismatch. Entries naming a coordinate that does not
    /// parse or has no cell are dropped with a warning.
    pub fn into_table(self, grid: &Grid) -> Result<PathTable> {
        let expected = layout_fingerprint(grid.config());
        if self.layout != expected {
            return Err(PitchError::LayoutMismatch {
                expected,
                found: self.layout,
            });
        }

        let resolve = |raw: &str| -> Option<HexCoord> {
            match raw.parse::<HexCoord>() {
                Ok(coord) if grid.contains(coord) => Some(coord),
                Ok(coord) => {
                    tracing::warn!("Shot table names {} which is not on the pitch", coord);
                    None
                }
                Err(e) => {
                    tracing::warn!("Unreadable shot table coordinate {:?}: {}", raw, e);
                    None
                }
            }
        };

        let mut table = PathTable::new();
        for (origin, targets) in self.paths {
            let Some(origin) = resolve(origin.as_str()) else {
                continue;
            };

            let mut resolved = BTreeMap::new();
            for (target, path) in targets {
                let Some(target) = resolve(target.as_str()) else {
                    continue;
                };
                let Some(path) = path.iter().map(|raw| resolve(raw.as_str())).collect::<Option<Vec<_>>>()
                else {
                    continue;
                };
                if path.is_empty() {
                    continue;
                }
                resolved.insert(target, path);
            }

            if !resolved.is_empty() {
                table.insert(origin, resolved);
            }
        }

        Ok(table)
    }
}

/// File location of a persisted table
#[derive(Debug, Clone)]
pub struct ShotTableStore {
    path: PathBuf,
}

impl ShotTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &PitchConfig) -> Self {
        Self::new(config.shot_table_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, grid: &Grid, table: &PathTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = ShotTableFile::from_table(grid.config(), table);
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;

        tracing::debug!("Saved {} shooting origins to {:?}", table.len(), self.path);
        Ok(())
    }

    pub fn load(&self, grid: &Grid) -> Result<PathTable> {
        let contents = fs::read_to_string(&self.path)?;
        let file: ShotTableFile = serde_json::from_str(&contents)?;
        file.into_table(grid)
    }
}
