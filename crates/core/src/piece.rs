//! Piece module - square shape bitmaps and the active tetromino
//!
//! A [`Shape`] is a square grid of filled/empty flags. Rotation turns the
//! square 90° clockwise in place, so a rotated shape always keeps its
//! footprint dimensions. There are no wall kicks: a rotation that collides
//! is rejected by the engine, never adjusted.

use std::fmt;

use crate::catalog::{color_of, shape_of};
use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest supported shape side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Why a dynamic shape could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    TooLarge { size: usize },
    NotSquare { row: usize, len: usize },
}

impl ShapeError {
    pub fn code(self) -> &'static str {
        match self {
            ShapeError::Empty => "empty_shape",
            ShapeError::TooLarge { .. } => "shape_too_large",
            ShapeError::NotSquare { .. } => "shape_not_square",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ShapeError::Empty => "shape has no rows",
            ShapeError::TooLarge { .. } => "shape is larger than 4x4",
            ShapeError::NotSquare { .. } => "shape row length differs from row count",
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ShapeError::Empty => f.write_str(self.message()),
            ShapeError::TooLarge { size } => write!(f, "{} (side {})", self.message(), size),
            ShapeError::NotSquare { row, len } => {
                write!(f, "{} (row {} has {} cells)", self.message(), row, len)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Square bitmap of a piece, `size` x `size`, stored in the top-left corner
/// of a fixed 4x4 array so shapes stay `Copy`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a square array of 0/1 flags.
    ///
    /// Squareness is guaranteed by the argument type; the side is checked
    /// at compile time when used in a const context.
    pub const fn from_square<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE_SIZE, "shape side must be 1..=4");
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                bits[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            bits,
        }
    }

    /// Build a shape from arbitrary rows, validating that they form a square
    /// no larger than 4x4. Any non-zero flag counts as filled.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let size = rows.len();
        if size == 0 {
            return Err(ShapeError::Empty);
        }
        if size > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { size });
        }

        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(ShapeError::NotSquare { row: y, len: row.len() });
            }
            for (x, &flag) in row.iter().enumerate() {
                bits[y][x] = flag != 0;
            }
        }

        Ok(Self {
            size: size as u8,
            bits,
        })
    }

    /// Side length of the square.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Local offsets of every filled cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.bits[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rows as 0/1 flags, for display and serialization.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|y| (0..n).map(|x| self.bits[y][x] as u8).collect())
            .collect()
    }

    /// Rotate 90° clockwise: `new[x][n-1-y] = old[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                bits[x][n - 1 - y] = self.bits[y][x];
            }
        }
        Self {
            size: self.size,
            bits,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        let mut list = f.debug_list();
        for y in 0..n {
            let row: String = (0..n)
                .map(|x| if self.bits[y][x] { '#' } else { '.' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}

/// Active falling piece
///
/// Owns its current shape; rotating never touches the catalog original.
/// `x`/`y` locate the shape's top-left cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino centered horizontally on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_of(kind);
        Self {
            kind,
            shape,
            color: color_of(kind),
            x: (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8,
            y: 0,
        }
    }

    /// Same piece moved by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated clockwise in place. The O piece never rotates.
    pub fn rotated(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Board coordinates of every filled cell.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
