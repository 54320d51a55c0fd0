//! Board module - manages the game grid
//!
//! The board is a `rows` x `cols` grid (20x10 by default) of cells that are
//! either empty or hold the color tag of a locked piece. Storage is a flat
//! row-major vector sized once at construction; dimensions never change.
//!
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom). Rows above the board (negative y) are conceptually empty
//! and inside the playfield, since pieces spawn partly above row 0.

use crate::types::{Cell, ColorTag, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds `i8::MAX`.
    pub fn new(rows: u8, cols: u8) -> Self {
        assert!(
            rows > 0 && cols > 0 && rows <= i8::MAX as u8 && cols <= i8::MAX as u8,
            "board dimensions must be in 1..=127, got {}x{}",
            rows,
            cols
        );
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.cols as i8 || y < 0 || y >= self.rows as i8 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the stored grid (including above row 0)
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) lies in the playfield for collision purposes.
    ///
    /// Horizontal bounds are strict; any y below `rows` counts, including
    /// negative rows above the visible board.
    pub fn is_inside(&self, x: i8, y: i8) -> bool {
        x >= 0 && x < self.cols as i8 && y < self.rows as i8
    }

    /// Whether (x, y) holds a locked cell. Above-board rows are always vacant.
    ///
    /// Horizontal bounds are the caller's concern (see [`Board::collides`]).
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if any of `cells` leaves the playfield or lands on a locked cell.
    pub fn collides(&self, cells: &[(i8, i8)]) -> bool {
        cells
            .iter()
            .any(|&(x, y)| !self.is_inside(x, y) || self.is_occupied(x, y))
    }

    /// Write `cells` into the grid with `color`.
    ///
    /// Cells above the board (y < 0) are dropped. Callers check collision
    /// first, so every remaining cell is in bounds.
    pub fn lock(&mut self, cells: &[(i8, i8)], color: ColorTag) {
        for &(x, y) in cells {
            if y >= 0 {
                self.set(x, y, Some(color));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row has no locked cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_none()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows as usize {
            return None;
        }
        let width = self.cols as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Remove row `y` and insert an empty row at the top.
    ///
    /// Everything above `y` shifts down by one; the row count is unchanged.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.rows as usize {
            return;
        }
        let width = self.cols as usize;
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Remove every full row in one pass and return their indices on the
    /// pre-clear board, bottom to top.
    ///
    /// Full rows are collected first, then the survivors are compacted
    /// toward the floor and the freed rows at the top are emptied.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let width = self.cols as usize;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                self.move_row(read_y, write_y, width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    fn move_row(&mut self, from: usize, to: usize, width: usize) {
        if from != to {
            let src = from * width;
            self.cells.copy_within(src..src + width, to * width);
        }
    }

    /// Number of locked cells on the board.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as owned vectors, top to bottom.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_HEIGHT, BOARD_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, color: ColorTag) {
        for x in 0..board.cols() as i8 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_custom_dimensions() {
        let board = Board::new(6, 4);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.cells().len(), 24);
        assert!(board.is_inside(3, 5));
        assert!(!board.is_inside(4, 5));
        assert!(!board.is_inside(0, 6));
    }

    #[test]
    #[should_panic]
    fn test_zero_rows_rejected() {
        let _ = Board::new(0, 10);
    }

    #[test]
    fn test_above_board_is_inside_and_vacant() {
        let board = Board::default();
        assert!(board.is_inside(4, -2));
        assert!(!board.is_occupied(4, -2));
        assert!(!board.collides(&[(4, -2), (4, -1)]));
    }

    #[test]
    fn test_lock_drops_cells_above_board() {
        let mut board = Board::default();
        board.lock(&[(4, -1), (5, -1), (4, 0), (5, 0)], ColorTag::Yellow);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(4, 0), Some(Some(ColorTag::Yellow)));
    }

    #[test]
    fn test_clear_row_shifts_down() {
        let mut board = Board::default();
        fill_row(&mut board, 19, ColorTag::Red);
        board.set(2, 18, Some(ColorTag::Blue));
        board.set(7, 0, Some(ColorTag::Green));

        board.clear_row(19);

        assert_eq!(board.get(2, 19), Some(Some(ColorTag::Blue)));
        assert_eq!(board.get(7, 1), Some(Some(ColorTag::Green)));
        assert!(board.is_row_empty(0));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = Board::default();
        fill_row(&mut board, 19, ColorTag::Red);
        board.set(0, 18, Some(ColorTag::Blue));
        fill_row(&mut board, 17, ColorTag::Red);
        board.set(3, 16, Some(ColorTag::Green));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(0, 19), Some(Some(ColorTag::Blue)));
        assert_eq!(board.get(3, 18), Some(Some(ColorTag::Green)));
        assert!(board.is_row_empty(0));
        assert!(board.is_row_empty(1));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_full_rows_matches_repeated_clear_row() {
        let mut batch = Board::default();
        for y in [19, 18, 16] {
            fill_row(&mut batch, y, ColorTag::Cyan);
        }
        batch.set(1, 17, Some(ColorTag::Orange));
        batch.set(8, 15, Some(ColorTag::Purple));
        let mut stepwise = batch.clone();

        batch.clear_full_rows();

        // Bottom-to-top, re-examining the same index after each removal.
        let mut y = stepwise.rows() as usize;
        while y > 0 {
            if stepwise.is_row_full(y - 1) {
                stepwise.clear_row(y - 1);
            } else {
                y -= 1;
            }
        }

        assert_eq!(batch, stepwise);
    }

    #[test]
    fn test_to_rows_shape() {
        let board = Board::new(5, 3);
        let rows = board.to_rows();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn test_clear_full_rows_removes_more_than_four() {
        let mut board = Board::default();
        for y in 14..20 {
            fill_row(&mut board, y, ColorTag::Blue);
        }
        board.set(6, 13, Some(ColorTag::Red));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, vec![19, 18, 17, 16, 15, 14]);
        assert!((0..20).all(|y| !board.is_row_full(y)));
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.get(6, 19), Some(Some(ColorTag::Red)));
    }
}
