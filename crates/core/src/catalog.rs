//! Shape catalog - static definitions of the seven tetrominoes
//!
//! Pure lookup, no logic. Shapes are square so that rotation never changes
//! a piece's footprint: I is 4x4, O is 2x2, the rest are 3x3.

use crate::piece::Shape;
use crate::types::{Color, PieceKind};

const I_SHAPE: Shape = Shape::from_square([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const J_SHAPE: Shape = Shape::from_square([
    [1, 0, 0],
    [1, 1, 1],
    [0, 0, 0],
]);

const L_SHAPE: Shape = Shape::from_square([
    [0, 0, 1],
    [1, 1, 1],
    [0, 0, 0],
]);

const O_SHAPE: Shape = Shape::from_square([
    [1, 1],
    [1, 1],
]);

const S_SHAPE: Shape = Shape::from_square([
    [0, 1, 1],
    [1, 1, 0],
    [0, 0, 0],
]);

const T_SHAPE: Shape = Shape::from_square([
    [0, 1, 0],
    [1, 1, 1],
    [0, 0, 0],
]);

const Z_SHAPE: Shape = Shape::from_square([
    [1, 1, 0],
    [0, 1, 1],
    [0, 0, 0],
]);

/// Spawn-orientation shape for a piece kind.
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Display color for a piece kind.
pub fn color_of(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::new(0x00, 0xf0, 0xf0), // cyan
        PieceKind::J => Color::new(0x00, 0x00, 0xf0), // blue
        PieceKind::L => Color::new(0xf0, 0xa0, 0x00), // orange
        PieceKind::O => Color::new(0xf0, 0xf0, 0x00), // yellow
        PieceKind::S => Color::new(0x00, 0xf0, 0x00), // green
        PieceKind::T => Color::new(0xa0, 0x00, 0xf0), // purple
        PieceKind::Z => Color::new(0xf0, 0x00, 0x00), // red
    }
}
