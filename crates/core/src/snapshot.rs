//! Read-only copies of engine state handed to renderers and other
//! collaborators. Nothing here aliases the live board.

use crate::board::Board;
use crate::engine::GamePhase;
use crate::piece::{Piece, PieceCells};
use crate::types::{ColorTag, PieceKind, Rotation};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    pub color: ColorTag,
    pub cells: PieceCells,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            rotation: value.rotation,
            color: value.color(),
            cells: value.occupied_cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
