//! Read-only view of a game for renderers and drivers.

use crate::core::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

/// Everything a front end needs to draw one frame, as plain `Copy` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Landed cells only; the falling piece is in `current`
    pub board: [[Cell; BOARD_COLS]; BOARD_ROWS],
    pub current: Option<Tetromino>,
    /// Row the current piece would land on
    pub ghost_y: Option<i8>,
    pub next: Tetromino,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Color at a board cell with the falling piece drawn on top.
    pub fn cell_with_piece(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = self.current {
            let hit = piece
                .board_cells()
                .any(|(px, py)| px as isize == x as isize && py as isize == y as isize);
            if hit {
                return Some(piece.color);
            }
        }
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS]; BOARD_ROWS],
            current: None,
            ghost_y: None,
            next: Tetromino::spawn(PieceKind::I),
            score: 0,
            paused: false,
            game_over: false,
        }
    }
}
