//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal renderer and the headless driver alike.
//!
//! # Board Dimensions
//!
//! The classic fixed-size playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the spawn side)
//!
//! # Scoring
//!
//! | Lines in one landing | Points |
//! |----------------------|--------|
//! | 0 | 0 |
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Board width as a `usize`, for array lengths.
pub const BOARD_COLS: usize = BOARD_WIDTH as usize;

/// Board height as a `usize`, for array lengths.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Default interval between gravity ticks (1000ms = 1 row per second)
pub const DEFAULT_DROP_MS: u64 = 1000;

/// Points awarded per landing, indexed by the number of rows cleared.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square (never rotates)
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order. One full bag.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase display letter.
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// 24-bit color token carried by board cells.
///
/// The engine never interprets it; it is only compared and handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form, as used by web front ends.
    pub fn hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a landed piece of that color
pub type Cell = Option<Color>;

/// Game actions that can be applied to the engine
///
/// These are produced by keyboard bindings and by the headless driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, landing it if blocked (same as a gravity tick)
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its lowest legal position and land it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Start over with an empty board
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("tick"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "movedown" | "down" | "softdrop" | "tick" => Some(GameAction::MoveDown),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "harddrop" | "drop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "reset" | "restart" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}
