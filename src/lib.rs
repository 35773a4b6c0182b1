//! Pitch Grid - hex-grid football pitch model

pub mod core;
pub mod pitch;
