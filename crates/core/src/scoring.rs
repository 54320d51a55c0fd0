//! Scoring module - line-clear points, level and gravity rules
//!
//! - Clearing N lines at once awards `line_scores[N] * level`
//! - Level is derived from score: `score / threshold + 1`
//! - Gravity interval shrinks by a fixed step per level down to a floor
//!
//! All functions are pure so the engine and tests share one definition.

use crate::config::EngineConfig;

/// Points for clearing `lines` rows at `level`.
///
/// `lines` above the table length is capped at the last entry.
pub fn line_clear_points(lines: usize, level: u32, table: &[u32; 5]) -> u32 {
    let idx = lines.min(table.len() - 1);
    table[idx].saturating_mul(level)
}

/// Level for an accumulated score (levels start at 1).
pub fn level_for_score(score: u32, threshold: u32) -> u32 {
    score / threshold.max(1) + 1
}

/// Gravity interval in milliseconds at `level`.
pub fn drop_interval_for_level(level: u32, config: &EngineConfig) -> u32 {
    let shaved = level
        .saturating_sub(1)
        .saturating_mul(config.drop_interval_step_ms);
    config
        .initial_drop_interval_ms
        .saturating_sub(shaved)
        .max(config.min_drop_interval_ms)
}

/// Result of applying one line clear to the score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

/// Score, level and interval after clearing `lines` rows.
///
/// Level and interval never move backwards even if a caller hands in a
/// config whose formula would.
pub fn apply_line_clear(
    lines: usize,
    score: u32,
    level: u32,
    drop_interval_ms: u32,
    config: &EngineConfig,
) -> ScoreUpdate {
    let points = line_clear_points(lines, level, &config.line_scores);
    let score = score.saturating_add(points);
    let level = level.max(level_for_score(score, config.level_score_threshold));
    let drop_interval_ms = drop_interval_ms.min(drop_interval_for_level(level, config));
    ScoreUpdate {
        points,
        score,
        level,
        drop_interval_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LINE_SCORES;

    #[test]
    fn test_line_points_scale_with_level() {
        assert_eq!(line_clear_points(0, 1, &LINE_SCORES), 0);
        assert_eq!(line_clear_points(1, 1, &LINE_SCORES), 100);
        assert_eq!(line_clear_points(2, 1, &LINE_SCORES), 300);
        assert_eq!(line_clear_points(3, 1, &LINE_SCORES), 500);
        assert_eq!(line_clear_points(4, 1, &LINE_SCORES), 800);
        assert_eq!(line_clear_points(4, 3, &LINE_SCORES), 2400);
    }

    #[test]
    fn test_line_points_capped_at_four() {
        assert_eq!(line_clear_points(6, 1, &LINE_SCORES), 800);
    }

    #[test]
    fn test_level_from_score() {
        assert_eq!(level_for_score(0, 1000), 1);
        assert_eq!(level_for_score(999, 1000), 1);
        assert_eq!(level_for_score(1000, 1000), 2);
        assert_eq!(level_for_score(5400, 1000), 6);
    }

    #[test]
    fn test_drop_intervals() {
        let config = EngineConfig::default();
        assert_eq!(drop_interval_for_level(1, &config), 1000);
        assert_eq!(drop_interval_for_level(2, &config), 900);
        assert_eq!(drop_interval_for_level(10, &config), 100);
        assert_eq!(drop_interval_for_level(40, &config), 100); // floor
    }

    #[test]
    fn test_faster_start_keeps_shrinking() {
        let config = EngineConfig::default().with_initial_drop_interval(500);
        assert_eq!(drop_interval_for_level(1, &config), 500);
        assert_eq!(drop_interval_for_level(3, &config), 300);
        assert_eq!(drop_interval_for_level(9, &config), 100);
    }

    #[test]
    fn test_apply_line_clear_tetris_levels_up() {
        let config = EngineConfig::default();
        let update = apply_line_clear(4, 900, 1, 1000, &config);
        assert_eq!(update.points, 800);
        assert_eq!(update.score, 1700);
        assert_eq!(update.level, 2);
        assert_eq!(update.drop_interval_ms, 900);
    }

    #[test]
    fn test_apply_line_clear_zero_lines_keeps_state() {
        let config = EngineConfig::default();
        let update = apply_line_clear(0, 300, 1, 1000, &config);
        assert_eq!(update.points, 0);
        assert_eq!(update.score, 300);
        assert_eq!(update.level, 1);
        assert_eq!(update.drop_interval_ms, 1000);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clear_never_moves_backwards(
                lines in 0usize..=4,
                score in 0u32..1_000_000,
                level in 1u32..40,
                interval in 100u32..=1000,
            ) {
                let config = EngineConfig::default();
                let update = apply_line_clear(lines, score, level, interval, &config);
                prop_assert!(update.score >= score);
                prop_assert!(update.level >= level);
                prop_assert!(update.drop_interval_ms <= interval);
                prop_assert!(update.drop_interval_ms >= config.min_drop_interval_ms);
            }
        }
    }
}
