//! Scoring module - line-clear rewards, levels and gravity timing
//!
//! Rules:
//! - A lock that clears `n` rows scores `level * LINE_REWARDS[n]`, using the
//!   level in effect when the piece locked (n is capped at 4).
//! - `level = 1 + total_lines / 10`.
//! - Gravity interval is `max(90, 700 - (level - 1) * 60)` ms; holding soft
//!   drop divides it by 8.

use crate::types::{
    BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, LINES_PER_LEVEL, LINE_REWARDS, SOFT_DROP_DIVISOR,
};

/// Result of applying one lock to the score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Rows that counted towards the reward (0-4).
    pub lines: u32,
    pub points: u32,
    pub level_before: u32,
    pub level_after: u32,
}

impl ScoreResult {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Score, level and line total of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    level: u32,
    lines: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Account for a lock that removed `cleared` rows.
    pub fn on_lines_cleared(&mut self, cleared: usize) -> ScoreResult {
        let level_before = self.level;
        if cleared == 0 {
            return ScoreResult {
                lines: 0,
                points: 0,
                level_before,
                level_after: level_before,
            };
        }

        let lines = cleared.min(4) as u32;
        let points = calculate_line_score(lines as usize, level_before);

        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self.score.saturating_add(points);
        self.level = calculate_level(self.lines);

        ScoreResult {
            lines,
            points,
            level_before,
            level_after: self.level,
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

/// Points for clearing `lines` rows at `level` (rows beyond 4 are capped).
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_REWARDS[lines.min(4)].saturating_mul(level)
}

/// Level reached after clearing `total_lines` rows. Starts at 1.
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, in milliseconds.
pub fn fall_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(speedup).max(FALL_FLOOR_MS)
}

/// Gravity interval while soft drop is held.
pub fn soft_drop_interval_ms(level: u32) -> u32 {
    fall_interval_ms(level) / SOFT_DROP_DIVISOR
}

/// Interval to schedule the next gravity decision with.
pub fn gravity_interval_ms(level: u32, soft_drop_held: bool) -> u32 {
    if soft_drop_held {
        soft_drop_interval_ms(level)
    } else {
        fall_interval_ms(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
        assert_eq!(calculate_line_score(4, 3), 2400);
        assert_eq!(calculate_line_score(6, 1), 800);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(1), 700);
        assert_eq!(fall_interval_ms(2), 640);
        assert_eq!(fall_interval_ms(10), 160);
        assert_eq!(fall_interval_ms(11), 100);
        assert_eq!(fall_interval_ms(12), 90);
        assert_eq!(fall_interval_ms(500), 90);
    }

    #[test]
    fn test_soft_drop_interval() {
        assert_eq!(soft_drop_interval_ms(1), 87);
        assert_eq!(soft_drop_interval_ms(2), 80);
        assert_eq!(soft_drop_interval_ms(40), 11);
        assert_eq!(gravity_interval_ms(1, false), 700);
        assert_eq!(gravity_interval_ms(1, true), 87);
    }

    #[test]
    fn score_uses_level_at_lock_time() {
        let mut s = ScoreState::new();
        s.on_lines_cleared(4);
        s.on_lines_cleared(4);
        assert_eq!(s.level(), 1);
        // 8 lines so far; this double crosses 10 but still pays at level 1.
        let r = s.on_lines_cleared(2);
        assert_eq!(r.points, 300);
        assert_eq!(r.level_before, 1);
        assert_eq!(r.level_after, 2);
        assert!(r.leveled_up());
        assert_eq!(s.lines(), 10);
        assert_eq!(s.score(), 800 + 800 + 300);
    }

    #[test]
    fn zero_clear_changes_nothing() {
        let mut s = ScoreState::new();
        let r = s.on_lines_cleared(0);
        assert_eq!(r.points, 0);
        assert_eq!(s, ScoreState::new());
    }
}
