//! Scoring module - points, level progression and level-based timing
//!
//! - Line clears use the classic per-count table multiplied by the current level.
//! - Hard drops award 2 points per cell, soft drops 1 point per cell.
//! - Gravity follows the guideline curve `(0.8 - 0.007 * g) ^ g` seconds per row
//!   where `g = min(level - 1, 14)`.

use crate::types::{
    BASE_LINE_CLEAR_S, GRAVITY_LEVEL_CAP, HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL,
    LINE_CLEAR_STEP_S, LINE_SCORES, MIN_LINE_CLEAR_S, SOFT_DROP_POINTS_PER_CELL,
};

/// Points for clearing `lines` rows at once (1-4) on `level`
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Points for moving a piece down `cells` rows
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS_PER_CELL
    } else {
        cells * SOFT_DROP_POINTS_PER_CELL
    }
}

/// Seconds per row of natural gravity
pub fn gravity_interval_s(level: u32) -> f32 {
    let g = level.saturating_sub(1).min(GRAVITY_LEVEL_CAP) as f32;
    (0.8 - g * 0.007).powf(g)
}

/// Length of the line-clear animation
pub fn line_clear_duration_s(level: u32) -> f32 {
    (BASE_LINE_CLEAR_S - LINE_CLEAR_STEP_S * level as f32).max(MIN_LINE_CLEAR_S)
}

/// Number of level-ups earned when total lines go from `before` to `after`
pub fn levels_gained(before: u32, after: u32) -> u32 {
    (after / LINES_PER_LEVEL).saturating_sub(before / LINES_PER_LEVEL)
}
