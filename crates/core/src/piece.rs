//! Piece module - a live instance of a shape kind
//!
//! A piece is plain `Copy` data: kind, home position and rotation. The home
//! position is the board cell under the top-left corner of the (rotated)
//! matrix. Occupied cells are always re-derived from the base matrix, never
//! cached, so a rotation can be undone by restoring the rotation field alone.

use arrayvec::ArrayVec;

use crate::shapes::{definition_for, ShapeMatrix};
use crate::types::{ColorTag, PieceKind, Rotation, MINOS_PER_PIECE};

/// Board coordinates covered by a piece.
pub type PieceCells = ArrayVec<(i8, i8), MINOS_PER_PIECE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl Piece {
    /// A piece in spawn orientation with its matrix corner at (`x`, `y`).
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: Rotation::North,
        }
    }

    pub fn color(&self) -> ColorTag {
        definition_for(self.kind).color
    }

    /// Base matrix turned `rotation` times, derived fresh on every call.
    pub fn rotated_matrix(&self) -> ShapeMatrix {
        definition_for(self.kind)
            .matrix
            .rotated(self.rotation.quarter_turns() as u32)
    }

    /// Board cells covered at the current position and rotation.
    pub fn occupied_cells(&self) -> PieceCells {
        self.cells_at(0, 0)
    }

    /// Board cells covered if the piece were translated by (`dx`, `dy`).
    pub fn cells_at(&self, dx: i8, dy: i8) -> PieceCells {
        self.rotated_matrix()
            .filled()
            .map(|(mx, my)| (self.x + mx + dx, self.y + my + dy))
            .collect()
    }

    /// Advance the rotation one quarter turn clockwise.
    ///
    /// No collision check happens here; the engine validates and reverts.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// Copy of this piece moved by (`dx`, `dy`).
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
