use thiserror::Error;

use crate::pitch::hex::HexCoord;

#[derive(Error, Debug)]
pub enum PitchError {
    #[error("Cell index {index} out of bounds (len {len}) for ({x}, {z})")]
    IndexOutOfBounds { x: i32, z: i32, index: usize, len: usize },

    #[error("Cell not found: {0}")]
    CellNotFound(HexCoord),

    #[error("Invalid coordinate string: {0}")]
    InvalidCoordinate(String),

    #[error("Shot table layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PitchError>;
