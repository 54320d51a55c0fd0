//! Notifications emitted by the engine for audio and presentation.
//!
//! The engine queues events as they happen; hosts drain them once per frame.
//! Nothing in the engine waits on or reacts to how events are consumed.

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new current piece was installed.
    Spawned { kind: PieceKind },
    /// The current piece was translated.
    Moved { dx: i8, dy: i8 },
    /// A rotation was attempted; `success == false` means it was reverted.
    Rotated { success: bool },
    /// The current piece became part of the board.
    Locked { kind: PieceKind },
    /// Emitted after every lock, including `count == 0`.
    LinesCleared { count: u8 },
    GameOver,
    Paused { paused: bool },
    Reset,
}

/// Outcome of a translation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// A sideways move hit a wall or the stack; nothing changed.
    Blocked,
    /// A downward move was blocked, so the piece locked.
    Locked { lines: u8, game_over: bool },
    /// No current piece, paused, or game over.
    Ignored,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }

    pub fn locked(&self) -> bool {
        matches!(self, MoveOutcome::Locked { .. })
    }
}

/// Outcome of one `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused, game over, no piece, or the interval has not elapsed.
    Idle,
    /// Gravity fired.
    Gravity(MoveOutcome),
}
