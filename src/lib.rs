//! Classic Tetris (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `classic_tetris::{core,engine,input,term,types}` and adds
//! what the binaries share: configuration, log setup and the headless driver.

pub use classic_tetris_core as core;
pub use classic_tetris_engine as engine;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;

pub mod config;
pub mod headless;
pub mod logging;
