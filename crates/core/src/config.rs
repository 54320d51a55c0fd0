//! Engine configuration
//!
//! Board size, gravity curve, scoring table and randomizer choice. Defaults
//! reproduce the classic rules; every field can be overridden for tests.

use thiserror::Error;

use crate::rng::RandomizerKind;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_DROP_INTERVAL_MS, DROP_INTERVAL_STEP_MS,
    LEVEL_SCORE_THRESHOLD, LINE_SCORES, MIN_DROP_INTERVAL_MS,
};

/// Smallest board side the engine accepts (a 4x4 matrix must fit).
pub const MIN_BOARD_SIDE: u8 = 4;

/// Largest board side the engine accepts.
pub const MAX_BOARD_SIDE: u8 = 64;

/// A configuration the engine refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be between {min}x{min} and {max}x{max}, got {rows} rows x {cols} cols", min = MIN_BOARD_SIDE, max = MAX_BOARD_SIDE)]
    BoardSize { rows: u8, cols: u8 },
    #[error("initial drop interval must be positive")]
    ZeroDropInterval,
    #[error("minimum drop interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    IntervalFloorAboveStart { min_ms: u32, initial_ms: u32 },
    #[error("level score threshold must be positive")]
    ZeroLevelThreshold,
    #[error("line score table must not decrease (entry {index})")]
    DecreasingLineScores { index: usize },
    #[error("board is {rows}x{cols} but config expects {expected_rows}x{expected_cols}")]
    BoardMismatch {
        rows: u8,
        cols: u8,
        expected_rows: u8,
        expected_cols: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: u8,
    pub cols: u8,
    pub initial_drop_interval_ms: u32,
    pub drop_interval_step_ms: u32,
    pub min_drop_interval_ms: u32,
    pub level_score_threshold: u32,
    /// Points for clearing 0..=4 lines, before the level multiplier.
    pub line_scores: [u32; 5],
    pub randomizer: RandomizerKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_HEIGHT,
            cols: BOARD_WIDTH,
            initial_drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            drop_interval_step_ms: DROP_INTERVAL_STEP_MS,
            min_drop_interval_ms: MIN_DROP_INTERVAL_MS,
            level_score_threshold: LEVEL_SCORE_THRESHOLD,
            line_scores: LINE_SCORES,
            randomizer: RandomizerKind::Uniform,
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(mut self, rows: u8, cols: u8) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_initial_drop_interval(mut self, ms: u32) -> Self {
        self.initial_drop_interval_ms = ms;
        self
    }

    pub fn with_min_drop_interval(mut self, ms: u32) -> Self {
        self.min_drop_interval_ms = ms;
        self
    }

    pub fn with_line_scores(mut self, table: [u32; 5]) -> Self {
        self.line_scores = table;
        self
    }

    pub fn with_level_threshold(mut self, score: u32) -> Self {
        self.level_score_threshold = score;
        self
    }

    pub fn with_randomizer(mut self, kind: RandomizerKind) -> Self {
        self.randomizer = kind;
        self
    }

    /// Column where new pieces put the left edge of their matrix.
    pub fn spawn_x(&self) -> i8 {
        (self.cols.saturating_sub(4) / 2) as i8
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |side: u8| (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side);
        if !side_ok(self.rows) || !side_ok(self.cols) {
            return Err(ConfigError::BoardSize {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.initial_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.min_drop_interval_ms > self.initial_drop_interval_ms {
            return Err(ConfigError::IntervalFloorAboveStart {
                min_ms: self.min_drop_interval_ms,
                initial_ms: self.initial_drop_interval_ms,
            });
        }
        if self.level_score_threshold == 0 {
            return Err(ConfigError::ZeroLevelThreshold);
        }
        if let Some(index) = (1..self.line_scores.len())
            .find(|&i| self.line_scores[i] < self.line_scores[i - 1])
        {
            return Err(ConfigError::DecreasingLineScores { index });
        }
        Ok(())
    }
}
