//! Scoring module - line-clear points, levels, and the speed curve
//!
//! - Points: 100/300/500/800 for 1-4 lines, times the level *before* the clear.
//! - Level: `1 + lines / 10`.
//! - Tick interval: `initial * decay^(level - 1)`, truncated to whole milliseconds.

use crate::types::{Score, LINES_PER_LEVEL, LINE_SCORES};

/// Base points for clearing `lines` rows at `level`
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level reached after `total_lines` lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Tick interval for a level, never below 1ms
pub fn tick_interval_ms(initial_ms: u64, decay: f64, level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as i32;
    let interval = (initial_ms as f64 * decay.powi(exponent)) as u64;
    interval.max(1)
}

/// Score after clearing `lines_cleared` rows, plus the points awarded
pub fn apply_line_clear(score: Score, lines_cleared: usize) -> (Score, u32) {
    let points = calculate_line_score(lines_cleared, score.level);
    let lines = score.lines.saturating_add(lines_cleared as u32);
    let next = Score {
        lines,
        score: score.score.saturating_add(points),
        level: level_for_lines(lines),
    };
    (next, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{INITIAL_TICK_MS, SPEED_DECAY};

    #[test]
    fn test_line_score_table() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_level_multiplier() {
        assert_eq!(calculate_line_score(1, 2), 200);
        assert_eq!(calculate_line_score(4, 3), 2400);
    }

    #[test]
    fn test_multiplier_uses_level_before_update() {
        let before = Score {
            lines: 9,
            score: 0,
            level: 1,
        };
        let (after, points) = apply_line_clear(before, 1);
        assert_eq!(points, 100);
        assert_eq!(after.lines, 10);
        assert_eq!(after.level, 2);
    }

    #[test]
    fn test_speed_curve() {
        assert_eq!(tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, 1), 800);
        assert_eq!(tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, 2), 640);
        assert_eq!(tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, 3), 512);
        assert_eq!(tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, 4), 409);
    }

    #[test]
    fn test_speed_strictly_decreases() {
        let mut prev = u64::MAX;
        for level in 1..=20 {
            let interval = tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, level);
            assert!(interval < prev, "level {} not faster", level);
            assert!(interval > 0);
            prev = interval;
        }
    }
}
