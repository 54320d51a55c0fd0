//! Shape library - the static catalog of the seven piece kinds
//!
//! Each kind owns one square occupancy matrix (2x2 for O, 4x4 for I, 3x3 for
//! the rest) and a color tag. Rotated orientations are never stored: they are
//! derived from the base matrix on demand, so all four states of a kind always
//! agree geometrically.

use crate::rng::SimpleRng;
use crate::types::{ColorTag, PieceKind};

/// Largest matrix side in the catalog (the I piece).
pub const MAX_MATRIX_SIDE: usize = 4;

/// Square occupancy matrix of side `size` (2, 3 or 4).
///
/// Storage is always 4x4; entries outside `size` are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[bool; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 entries.
    const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the entry at (`row`, `col`) is filled. Out-of-range is empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// One 90° clockwise turn: `rotated[j][N-1-i] = original[i][j]`.
    pub fn rotate_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_MATRIX_SIDE]; MAX_MATRIX_SIDE];
        for i in 0..n {
            for j in 0..n {
                cells[j][n - 1 - i] = self.cells[i][j];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// The matrix after `times` clockwise quarter turns (mod 4).
    pub fn rotated(&self, times: u32) -> Self {
        let mut m = *self;
        for _ in 0..times % 4 {
            m = m.rotate_cw();
        }
        m
    }

    /// Filled entries as `(col, row)` offsets, row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }
}

/// Immutable pair of base matrix and color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: ColorTag,
}

/// Indexed by [`PieceKind::index`].
static SHAPES: [ShapeDefinition; 7] = [
    ShapeDefinition {
        kind: PieceKind::I,
        matrix: ShapeMatrix::from_rows([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
        color: ColorTag::Cyan,
    },
    ShapeDefinition {
        kind: PieceKind::J,
        matrix: ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        color: ColorTag::Blue,
    },
    ShapeDefinition {
        kind: PieceKind::L,
        matrix: ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        color: ColorTag::Orange,
    },
    ShapeDefinition {
        kind: PieceKind::O,
        matrix: ShapeMatrix::from_rows([[1, 1], [1, 1]]),
        color: ColorTag::Yellow,
    },
    ShapeDefinition {
        kind: PieceKind::S,
        matrix: ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        color: ColorTag::Green,
    },
    ShapeDefinition {
        kind: PieceKind::T,
        matrix: ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        color: ColorTag::Purple,
    },
    ShapeDefinition {
        kind: PieceKind::Z,
        matrix: ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        color: ColorTag::Red,
    },
];

/// Shape definition for a kind. Total over the enum.
pub fn definition_for(kind: PieceKind) -> &'static ShapeDefinition {
    &SHAPES[kind.index()]
}

/// Uniformly random kind drawn from `rng`.
pub fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_sizes_follow_kind() {
        for kind in PieceKind::ALL {
            let expected = match kind {
                PieceKind::O => 2,
                PieceKind::I => 4,
                _ => 3,
            };
            assert_eq!(definition_for(kind).matrix.size(), expected, "{:?}", kind);
            assert_eq!(definition_for(kind).kind, kind);
        }
    }

    #[test]
    fn every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            let m = definition_for(kind).matrix;
            for turns in 0..4 {
                assert_eq!(m.rotated(turns).filled_count(), 4);
            }
        }
    }

    #[test]
    fn colors_are_distinct() {
        let mut seen = Vec::new();
        for kind in PieceKind::ALL {
            let color = definition_for(kind).color;
            assert!(!seen.contains(&color));
            seen.push(color);
        }
    }

    #[test]
    fn t_rotates_clockwise() {
        // 0 1 0      0 1 0
        // 1 1 1  ->  0 1 1
        // 0 0 0      0 1 0
        let east = definition_for(PieceKind::T).matrix.rotate_cw();
        let cells: Vec<_> = east.filled().collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn i_turns_vertical_in_column_two() {
        let east = definition_for(PieceKind::I).matrix.rotated(1);
        let cells: Vec<_> = east.filled().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn o_is_rotation_invariant() {
        let m = definition_for(PieceKind::O).matrix;
        assert_eq!(m.rotate_cw(), m);
    }

    #[test]
    fn random_kind_is_deterministic_for_seed() {
        let mut a = SimpleRng::new(99);
        let mut b = SimpleRng::new(99);
        for _ in 0..50 {
            assert_eq!(random_kind(&mut a), random_kind(&mut b));
        }
    }

    #[test]
    fn random_kind_covers_all_kinds() {
        let mut rng = SimpleRng::new(7);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            counts[random_kind(&mut rng).index()] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!(c > 700, "kind {} drawn only {} times", i, c);
        }
    }
}
