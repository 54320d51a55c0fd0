//! Game engine - the orchestrator
//!
//! Ties together the board, the current and next pieces, the randomizer and
//! the score/level/gravity state, and applies the transition rules: spawn,
//! move, rotate, lock, clear and game over.
//!
//! # Phases
//!
//! `Ready` (no piece) → `Running` ⇄ `Paused` → `GameOver`. Game over is
//! terminal until [`GameEngine::reset`] or [`GameEngine::start`].
//!
//! Invalid moves and rotations are ordinary outcomes, reported as values.
//! Every mutation of the current piece is collision-checked before it is
//! applied, so the piece never overlaps the stack or leaves the playfield.

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::events::{GameEvent, MoveOutcome, StepOutcome};
use crate::piece::Piece;
use crate::rng::Randomizer;
use crate::scoring::apply_line_clear;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameCommand, PieceKind};

/// Coarse lifecycle state derived from the engine flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Ready,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "ready",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    randomizer: Randomizer,
    score: u32,
    level: u32,
    /// Total rows cleared since the last reset.
    lines: u32,
    drop_interval_ms: u32,
    /// Time since the last gravity step.
    drop_timer_ms: u32,
    game_over: bool,
    paused: bool,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine with default rules and a uniform randomizer.
    pub fn new(seed: u32) -> Self {
        let config = EngineConfig::default();
        Self::assemble(
            config,
            Randomizer::new(config.randomizer, seed),
            Board::new(config.rows, config.cols),
        )
    }

    /// Create an engine with custom rules, seeding the configured randomizer.
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_randomizer(config, Randomizer::new(config.randomizer, seed))
    }

    /// Create an engine that draws pieces from `randomizer`.
    pub fn with_randomizer(
        config: EngineConfig,
        randomizer: Randomizer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols);
        Ok(Self::assemble(config, randomizer, board))
    }

    /// Create an engine starting from a prepared board.
    ///
    /// The engine takes ownership; the board must match the configured size.
    pub fn with_board(
        config: EngineConfig,
        randomizer: Randomizer,
        board: Board,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.rows() != config.rows || board.cols() != config.cols {
            return Err(ConfigError::BoardMismatch {
                rows: board.rows(),
                cols: board.cols(),
                expected_rows: config.rows,
                expected_cols: config.cols,
            });
        }
        Ok(Self::assemble(config, randomizer, board))
    }

    fn assemble(config: EngineConfig, randomizer: Randomizer, board: Board) -> Self {
        Self {
            config,
            board,
            current: None,
            next: None,
            randomizer,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: config.initial_drop_interval_ms,
            drop_timer_ms: 0,
            game_over: false,
            paused: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
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

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else if self.current.is_none() {
            GamePhase::Ready
        } else {
            GamePhase::Running
        }
    }

    /// Events queued since the last drain, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Commands other than reset/start only act while running.
    fn accepts_commands(&self) -> bool {
        !self.game_over && !self.paused && self.current.is_some()
    }

    /// Empty the board and zero the score. Returns to `Ready`.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = self.config.initial_drop_interval_ms;
        self.drop_timer_ms = 0;
        self.game_over = false;
        self.paused = false;
        self.events.push(GameEvent::Reset);
    }

    /// Reset and spawn the first piece.
    pub fn start(&mut self) {
        self.reset();
        self.spawn_next();
    }

    fn fresh_piece(&mut self) -> Piece {
        let kind = self.randomizer.next_kind();
        Piece::new(kind, self.config.spawn_x(), 0)
    }

    /// Promote the lookahead piece (or a fresh one) to current and draw a
    /// new lookahead.
    ///
    /// If the new piece already collides, the game is over; the piece stays
    /// installed so the final board can be drawn. Returns false in that case
    /// and when the game was already over.
    pub fn spawn_next(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let current = match self.next.take() {
            Some(piece) => piece,
            None => self.fresh_piece(),
        };
        let next = self.fresh_piece();
        self.current = Some(current);
        self.next = Some(next);
        self.events.push(GameEvent::Spawned { kind: current.kind });

        if self.board.collides(&current.occupied_cells()) {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            return false;
        }
        true
    }

    /// Translate the current piece by (`dx`, `dy`).
    ///
    /// A blocked downward move locks the piece, clears lines and spawns the
    /// next one. A blocked sideways move changes nothing.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if !self.accepts_commands() {
            return MoveOutcome::Ignored;
        }
        let Some(piece) = self.current else {
            return MoveOutcome::Ignored;
        };

        if !self.board.collides(&piece.cells_at(dx, dy)) {
            self.current = Some(piece.translated(dx, dy));
            self.events.push(GameEvent::Moved { dx, dy });
            return MoveOutcome::Moved;
        }

        if dy > 0 {
            self.lock_piece();
            let lines = self.clear_lines();
            self.spawn_next();
            return MoveOutcome::Locked {
                lines,
                game_over: self.game_over,
            };
        }

        MoveOutcome::Blocked
    }

    /// Rotate the current piece a quarter turn clockwise.
    ///
    /// A rotation that would collide is reverted; there is no wall-kick
    /// search. Returns whether the rotation stuck.
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(mut piece) = self.current else {
            return false;
        };

        let previous = piece.rotation;
        piece.rotate();
        let success = !self.board.collides(&piece.occupied_cells());
        if !success {
            piece.rotation = previous;
        }
        self.current = Some(piece);
        self.events.push(GameEvent::Rotated { success });
        success
    }

    /// Drop the current piece until it locks.
    ///
    /// Each successful step moves one row down, so the loop ends within
    /// `rows` iterations with exactly one lock.
    pub fn hard_drop(&mut self) -> MoveOutcome {
        loop {
            match self.try_move(0, 1) {
                MoveOutcome::Moved => continue,
                outcome => return outcome,
            }
        }
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Once the accumulated time reaches the drop interval the piece moves
    /// down one row (or locks) and the clock restarts from zero.
    pub fn step(&mut self, elapsed_ms: u32) -> StepOutcome {
        if !self.accepts_commands() {
            return StepOutcome::Idle;
        }
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return StepOutcome::Idle;
        }
        self.drop_timer_ms = 0;
        StepOutcome::Gravity(self.try_move(0, 1))
    }

    /// Write the current piece into the board and discard it.
    ///
    /// Cells above row 0 vanish. Returns false when there is nothing to lock.
    pub fn lock_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current.take() else {
            return false;
        };
        self.board.lock(&piece.occupied_cells(), piece.color());
        self.events.push(GameEvent::Locked { kind: piece.kind });
        true
    }

    /// Remove full rows, update score, level and gravity, and report the
    /// number of rows removed.
    pub fn clear_lines(&mut self) -> u8 {
        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            let update = apply_line_clear(
                cleared,
                self.score,
                self.level,
                self.drop_interval_ms,
                &self.config,
            );
            self.score = update.score;
            self.level = update.level;
            self.drop_interval_ms = update.drop_interval_ms;
            self.lines = self.lines.saturating_add(cleared as u32);
        }
        let count = cleared as u8;
        self.events.push(GameEvent::LinesCleared { count });
        count
    }

    /// Flip the paused flag. No effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        self.events.push(GameEvent::Paused {
            paused: self.paused,
        });
        true
    }

    /// Where the current piece would come to rest if hard-dropped.
    ///
    /// Computed from the live piece and board on every call.
    pub fn ghost(&self) -> Option<Piece> {
        let mut ghost = self.current?;
        while !self.board.collides(&ghost.cells_at(0, 1)) {
            ghost.y += 1;
        }
        Some(ghost)
    }

    /// Dispatch a host command. Returns true if it changed anything.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0).moved(),
            GameCommand::MoveRight => self.try_move(1, 0).moved(),
            GameCommand::SoftDrop => {
                !matches!(self.try_move(0, 1), MoveOutcome::Ignored)
            }
            GameCommand::Rotate => self.rotate(),
            GameCommand::HardDrop => self.hard_drop().locked(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Start => {
                self.start();
                true
            }
        }
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next.map(|p| p.kind)
    }

    /// Owned, read-only copy of everything a renderer needs.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current: self.current.map(PieceSnapshot::from),
            ghost: self.ghost().map(PieceSnapshot::from),
            next: self.next.map(PieceSnapshot::from),
            score: self.score,
            level: self.level,
            lines: self.lines,
            drop_interval_ms: self.drop_interval_ms,
            phase: self.phase(),
            paused: self.paused,
            game_over: self.game_over,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
