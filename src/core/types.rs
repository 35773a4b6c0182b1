//! Core type definitions shared by the pitch modules

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a token (player piece) on the pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub Uuid);

impl TokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which team a token plays for in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

/// Who stands on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Attacker(TokenId),
    Defender(TokenId),
}

impl Occupant {
    pub fn of(side: Side, token: TokenId) -> Self {
        match side {
            Side::Attacker => Occupant::Attacker(token),
            Side::Defender => Occupant::Defender(token),
        }
    }

    pub fn token(&self) -> Option<TokenId> {
        match self {
            Occupant::Empty => None,
            Occupant::Attacker(id) | Occupant::Defender(id) => Some(*id),
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Occupant::Empty => None,
            Occupant::Attacker(_) => Some(Side::Attacker),
            Occupant::Defender(_) => Some(Side::Defender),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }
}

/// Sign of a pitch half: -1 (left), 0 (none), 1 (right)
pub type FieldSide = i8;
