//! Engine - the transitions that consume pieces
//!
//! Gravity, hard drop and reset all may need a fresh piece, so they live here
//! next to the piece source. Every method takes a state by reference and
//! returns the successor; the engine itself holds nothing but the source.

use tracing::{debug, info};

use crate::core::{score_for, Board, PieceBag, PieceSource, Tetromino};
use crate::game_state::{GameState, Landing};
use crate::types::GameAction;

/// Drives games with pieces from `S`.
#[derive(Debug, Clone)]
pub struct Engine<S: PieceSource = PieceBag> {
    source: S,
}

impl Engine<PieceBag> {
    /// Engine backed by a 7-bag seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self::with_source(PieceBag::new(seed))
    }
}

impl<S: PieceSource> Engine<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn spawn(&mut self) -> Tetromino {
        Tetromino::spawn(self.source.next_kind())
    }

    /// Fresh game: empty board, score 0, two pieces drawn (current then next).
    pub fn create_game(&mut self) -> GameState {
        let current = self.spawn();
        let next = self.spawn();
        debug!(current = current.kind.as_str(), next = next.kind.as_str(), "new game");
        GameState::from_parts(Board::new(), current, next, 0)
    }

    /// One gravity step: move down, or land if that is blocked.
    pub fn tick(&mut self, state: &GameState) -> GameState {
        let Some(piece) = state.playable_piece() else {
            return state.clone();
        };
        if !state.board.collides(&piece, 0, 1) {
            return state.with_current(piece.shifted(0, 1));
        }
        self.land(state, piece)
    }

    /// Drop straight to the lowest free row and land there.
    pub fn hard_drop(&mut self, state: &GameState) -> GameState {
        let Some(mut piece) = state.playable_piece() else {
            return state.clone();
        };
        while !state.board.collides(&piece, 0, 1) {
            piece = piece.shifted(0, 1);
        }
        self.land(state, piece)
    }

    /// Start over. Allowed from any phase; the piece source carries on.
    pub fn reset(&mut self, state: &GameState) -> GameState {
        info!(final_score = state.score, "game reset");
        self.create_game()
    }

    pub fn apply(&mut self, state: &GameState, action: GameAction) -> GameState {
        match action {
            GameAction::MoveLeft => state.move_left(),
            GameAction::MoveRight => state.move_right(),
            GameAction::MoveDown => self.tick(state),
            GameAction::Rotate => state.rotate(),
            GameAction::HardDrop => self.hard_drop(state),
            GameAction::Pause => state.toggle_pause(),
            GameAction::Reset => self.reset(state),
        }
    }

    /// Apply `action` and report the landing it caused, if any.
    ///
    /// A rejected or ignored action returns the input state unchanged, which
    /// still carries the landing of an earlier transition; that one is not
    /// reported again.
    pub fn step(&mut self, state: &GameState, action: GameAction) -> (GameState, Option<Landing>) {
        let next = self.apply(state, action);
        let landing = if next == *state { None } else { next.last_landing() };
        (next, landing)
    }

    /// Merge `piece` where it stands, clear rows, score, then either end the
    /// game or promote the next piece.
    fn land(&mut self, state: &GameState, piece: Tetromino) -> GameState {
        let mut board = state.board.merged(&piece);
        let lines = board.clear_full_rows().len();
        let points = score_for(lines);
        let score = state.score.saturating_add(points);
        let topped_out = board.is_top_row_occupied();

        let landing = Landing {
            lines_cleared: lines as u32,
            points,
            topped_out,
        };
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines,
            points,
            "piece landed"
        );

        if topped_out {
            info!(score, "game over");
            return GameState {
                board,
                current: None,
                next: state.next,
                score,
                game_over: true,
                paused: false,
                last_landing: Some(landing),
            };
        }

        GameState {
            board,
            current: Some(state.next),
            next: self.spawn(),
            score,
            game_over: false,
            paused: false,
            last_landing: Some(landing),
        }
    }
}

impl Default for Engine<PieceBag> {
    fn default() -> Self {
        Self::with_source(PieceBag::default())
    }
}
