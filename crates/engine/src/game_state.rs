//! Game state module - one immutable snapshot of a game in progress
//!
//! A [`GameState`] is a plain value. Every transition builds and returns a new
//! state; the input is never touched, so a caller can never observe a
//! half-applied move. Transitions that need a fresh piece (landing, reset)
//! live on [`crate::Engine`], which owns the randomizer. The rest are here.

use tracing::info;

use crate::core::{Board, Tetromino};
use crate::snapshot::GameSnapshot;

/// Which of the three game phases a state is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is falling and accepts input
    Active,
    /// Everything except un-pause and reset is ignored
    Paused,
    /// Terminal; only reset leaves it
    GameOver,
}

/// What happened when a piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Landing {
    /// Rows removed by this landing (0 if none)
    pub lines_cleared: u32,
    /// Points added to the score
    pub points: u32,
    /// The board's top row ended up occupied, ending the game
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    /// `None` only once the game is over
    pub(crate) current: Option<Tetromino>,
    pub(crate) next: Tetromino,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
    pub(crate) paused: bool,
    /// Landing that produced this state; no-op transitions keep it as is
    pub(crate) last_landing: Option<Landing>,
}

impl GameState {
    /// An active game built from explicit parts.
    ///
    /// `Engine::create_game` is the usual way in; this exists for fixtures and
    /// for drivers that set up a specific position.
    pub fn from_parts(board: Board, current: Tetromino, next: Tetromino, score: u32) -> Self {
        Self {
            board,
            current: Some(current),
            next,
            score,
            game_over: false,
            paused: false,
            last_landing: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_landing(&self) -> Option<Landing> {
        self.last_landing
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Active
        }
    }

    /// The falling piece, if the game currently accepts moves.
    pub fn playable_piece(&self) -> Option<Tetromino> {
        if self.game_over || self.paused {
            return None;
        }
        self.current
    }

    /// Lowest row the current piece could drop to, for ghost rendering.
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.current?;
        while !self.board.collides(&piece, 0, 1) {
            piece = piece.shifted(0, 1);
        }
        Some(piece.y)
    }

    /// Same state with a different falling piece.
    pub(crate) fn with_current(&self, piece: Tetromino) -> Self {
        Self {
            board: self.board.clone(),
            current: Some(piece),
            next: self.next,
            score: self.score,
            game_over: self.game_over,
            paused: self.paused,
            last_landing: None,
        }
    }

    fn shifted(&self, dx: i8) -> Self {
        match self.playable_piece() {
            Some(piece) if !self.board.collides(&piece, dx, 0) => {
                self.with_current(piece.shifted(dx, 0))
            }
            _ => self.clone(),
        }
    }

    /// Move one column left unless blocked.
    pub fn move_left(&self) -> Self {
        self.shifted(-1)
    }

    /// Move one column right unless blocked.
    pub fn move_right(&self) -> Self {
        self.shifted(1)
    }

    /// Rotate clockwise in place; a rotation that would collide is dropped
    /// without trying any other position.
    pub fn rotate(&self) -> Self {
        let Some(piece) = self.playable_piece() else {
            return self.clone();
        };
        let rotated = piece.rotated();
        if self.board.collides(&rotated, 0, 0) {
            return self.clone();
        }
        self.with_current(rotated)
    }

    /// Flip between active and paused. Ignored once the game is over.
    pub fn toggle_pause(&self) -> Self {
        if self.game_over {
            return self.clone();
        }
        info!(paused = !self.paused, "pause toggled");
        Self {
            paused: !self.paused,
            last_landing: None,
            ..self.clone()
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.to_grid();
        out.current = self.current;
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
