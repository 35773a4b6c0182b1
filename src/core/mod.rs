pub mod config;
pub mod error;
pub mod types;

pub use config::PitchConfig;
pub use error::{PitchError, Result};
pub use types::{FieldSide, Occupant, Side, TokenId};
