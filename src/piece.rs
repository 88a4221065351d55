use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The reduced piece set of the race variant. No pawns or queens, so no
/// promotion and no pawn-specific movement anywhere in the rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Rook,
    Knight,
    Bishop,
}

impl PieceKind {
    fn letter(&self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

/// Two-character code: color letter then kind letter, e.g. "WK", "BN".
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color, self.kind.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_codes() {
        assert_eq!(Piece::new(PieceKind::King, Color::White).to_string(), "WK");
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).to_string(), "BN");
        assert_eq!(Piece::new(PieceKind::Bishop, Color::Black).to_string(), "BB");
    }

    #[test]
    fn opposite_flips() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
