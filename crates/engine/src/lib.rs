//! Game engine - the classic Tetris state machine
//!
//! A game is a sequence of immutable [`GameState`] values. Moves that never
//! need a new piece (left, right, rotate, pause) are methods on the state
//! itself; gravity, hard drop and reset go through an [`Engine`], which owns
//! the piece source.
//!
//! ```
//! use classic_tetris_engine::{Engine, Phase};
//! use classic_tetris_engine::types::GameAction;
//!
//! let mut engine = Engine::new(7);
//! let state = engine.create_game();
//! let moved = engine.apply(&state, GameAction::MoveLeft);
//! assert_eq!(moved.phase(), Phase::Active);
//!
//! let landed = engine.apply(&moved, GameAction::HardDrop);
//! assert_eq!(landed.board().filled_count(), 4);
//! ```

pub mod engine;
pub mod game_state;
pub mod snapshot;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use engine::Engine;
pub use game_state::{GameState, Landing, Phase};
pub use snapshot::GameSnapshot;
