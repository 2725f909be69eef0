//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of classic Tetris that do not depend on game
//! flow: piece shapes, the board, the randomizer and the score table. It has
//! **zero dependencies** on UI, timing or I/O.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven tetromino shapes and colors
//! - [`piece`]: square shape bitmaps, rotation, and the active [`Tetromino`]
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`rng`]: 7-bag random piece generation with an injectable shuffle
//! - [`scoring`]: points per landing
//!
//! # Rules
//!
//! - **7-Bag Randomizer**: every 7 draws from a refill contain each piece once
//! - **Matrix Rotation**: clockwise turn of the shape's square; O never rotates;
//!   no wall kicks
//! - **Simultaneous Clears**: all full rows of one landing disappear together
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{Board, PieceBag, Tetromino};
//!
//! let mut bag = PieceBag::new(12345);
//! let piece = Tetromino::spawn(bag.draw());
//!
//! let board = Board::new();
//! assert!(!board.collides(&piece, 0, 0));
//!
//! let landed = board.merged(&piece);
//! assert_eq!(landed.filled_count(), 4);
//! ```

pub mod board;
pub mod catalog;
pub mod piece;
pub mod rng;
pub mod scoring;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use catalog::{color_of, shape_of};
pub use piece::{Shape, ShapeError, Tetromino, MAX_SHAPE_SIZE};
pub use rng::{PieceBag, PieceSource, Shuffler, SimpleRng};
pub use scoring::score_for;
