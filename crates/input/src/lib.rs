//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. One key press
//! is one action; the interactive loop decides which event kinds count.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
