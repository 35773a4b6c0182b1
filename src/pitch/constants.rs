//! Pitch line positions, all in offset coordinates
//!
//! `x` values are measured from the halfway column and apply to both halves.
//! Several z windows differ between even and odd columns because odd columns
//! sit half a hex lower.

// Touchlines and goal lines
pub const MAX_IN_BOUNDS_X: i32 = 18;
/// Even columns are out at `z >= 13` or `z <= -13`
pub const EVEN_Z_OUT_UPPER: i32 = 13;
pub const EVEN_Z_OUT_LOWER: i32 = -13;
/// Odd columns are out at `z >= 13` or `z <= -14`
pub const ODD_Z_OUT_UPPER: i32 = 13;
pub const ODD_Z_OUT_LOWER: i32 = -14;

// Goals
pub const GOAL_X: i32 = 19;
pub const GOAL_Z_MIN: i32 = -4;
pub const GOAL_Z_MAX: i32 = 3;

// Penalty box and final third share the same z window
pub const PENALTY_BOX_X_MIN: i32 = 12;
pub const FINAL_THIRD_X_MIN: i32 = 8;
pub const BOX_Z_MIN: i32 = -7;
/// Exclusive; odd columns get one extra row
pub const EVEN_BOX_Z_END: i32 = 7;
pub const ODD_BOX_Z_END: i32 = 8;

// Centre circle radius in hexes
pub const CENTRE_CIRCLE_RADIUS: u32 = 3;

/// Minimum |x| for a cell to get precomputed shooting paths
pub const SHOT_ORIGIN_MIN_X: i32 = 8;

/// Goalkeeper reach along their column, each direction
pub const GOALKEEPER_SAVE_REACH: i32 = 3;

/// Bumped whenever a classification rule above changes; part of the
/// shot-table fingerprint
pub const RULES_REVISION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_nest() {
        assert!(FINAL_THIRD_X_MIN < PENALTY_BOX_X_MIN);
        assert!(PENALTY_BOX_X_MIN <= MAX_IN_BOUNDS_X);
        assert_eq!(GOAL_X, MAX_IN_BOUNDS_X + 1);
    }

    #[test]
    fn test_goal_inside_box_window() {
        assert!(GOAL_Z_MIN >= BOX_Z_MIN);
        assert!(GOAL_Z_MAX < EVEN_BOX_Z_END);
    }

    #[test]
    fn test_parity_windows_differ_by_one() {
        assert_eq!(ODD_BOX_Z_END - EVEN_BOX_Z_END, 1);
        assert_eq!(EVEN_Z_OUT_LOWER - ODD_Z_OUT_LOWER, 1);
    }
}
