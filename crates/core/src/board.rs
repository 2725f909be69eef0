//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//! Pieces spawn at the top; rows above the board (negative y) are open space.

use arrayvec::ArrayVec;

use crate::piece::Tetromino;
use crate::types::{Cell, Color, BOARD_COLS, BOARD_HEIGHT, BOARD_ROWS, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Row indices removed by one clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, BOARD_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * BOARD_COLS + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells, left to right. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_COLS;
        &self.cells[start..start + BOARD_COLS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Game-over predicate: any cell of row 0 occupied.
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_some())
    }

    /// Would `piece`, moved by (dx, dy), hit a wall, the floor, or a filled cell?
    ///
    /// Cells above the board (y < 0) only check the side walls, so a freshly
    /// spawned piece may poke over the top edge.
    pub fn collides(&self, piece: &Tetromino, dx: i8, dy: i8) -> bool {
        piece.board_cells().any(|(px, py)| {
            let x = px + dx;
            let y = py + dy;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write the piece's cells in its color. Cells outside the board are dropped.
    pub fn merge(&mut self, piece: &Tetromino) {
        for (x, y) in piece.board_cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Copy of this board with `piece` merged in.
    pub fn merged(&self, piece: &Tetromino) -> Board {
        let mut next = self.clone();
        next.merge(piece);
        next
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Every full row is removed in one pass; the remaining rows keep their
    /// order and empty rows are added at the top. Uses a two-pointer scan with
    /// zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = BOARD_ROWS;

        // Scan from bottom to top
        for read_y in (0..BOARD_ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * BOARD_COLS;
                    let dst_start = write_y * BOARD_COLS;
                    self.cells
                        .copy_within(src_start..src_start + BOARD_COLS, dst_start);
                }
            }
        }

        self.cells[..write_y * BOARD_COLS].fill(None);
        cleared_rows
    }

    /// Copy of this board with full rows removed, plus how many were removed.
    pub fn without_full_rows(&self) -> (Board, usize) {
        let mut next = self.clone();
        let count = next.clear_full_rows().len();
        (next, count)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Build a board from text rows, top to bottom: `.` is empty, anything
    /// else is filled with `color`. Short inputs are padded with empty rows on
    /// top; rows must be exactly `BOARD_WIDTH` wide.
    ///
    /// Panics on malformed input; meant for tests and fixtures.
    pub fn from_ascii(rows: &[&str], color: Color) -> Self {
        assert!(rows.len() <= BOARD_ROWS, "too many rows: {}", rows.len());
        let mut board = Self::new();
        let top = BOARD_ROWS - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), BOARD_COLS, "row {} has wrong width", i);
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    board.set(x as i8, (top + i) as i8, Some(color));
                }
            }
        }
        board
    }

    /// Convert to a 2D grid for rendering and serialization.
    pub fn to_grid(&self) -> [[Cell; BOARD_COLS]; BOARD_ROWS] {
        let mut grid = [[None; BOARD_COLS]; BOARD_ROWS];
        for (y, row) in grid.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
