//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is flushed to the terminal.
//!
//! Goals:
//! - Keep the engine deterministic and testable
//! - Draw each board cell 2 chars wide to offset the glyph aspect ratio
//! - Only write the parts of the screen that changed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_engine as engine;
pub use classic_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
