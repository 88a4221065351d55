use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Square;
use crate::piece::{Color, Piece, PieceKind};

/// Pure piece storage: an 8x8 grid of optional pieces, indexed
/// `[rank][file]` with rank 0 = rank 1. No legality knowledge lives here —
/// mutation is the only way the position changes, reads never mutate.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The race starting layout: each side has a king, a rook, two knights
    /// and two bishops on ranks 1–2. White on files a–c, Black on files f–h;
    /// ranks 3–8 start empty.
    pub fn new() -> Self {
        let mut squares = [[None; 8]; 8];

        // Rank 1
        squares[0][0] = Some(Piece::new(PieceKind::King, Color::White)); // a1
        squares[0][1] = Some(Piece::new(PieceKind::Bishop, Color::White)); // b1
        squares[0][2] = Some(Piece::new(PieceKind::Knight, Color::White)); // c1
        squares[0][5] = Some(Piece::new(PieceKind::Knight, Color::Black)); // f1
        squares[0][6] = Some(Piece::new(PieceKind::Bishop, Color::Black)); // g1
        squares[0][7] = Some(Piece::new(PieceKind::King, Color::Black)); // h1

        // Rank 2
        squares[1][0] = Some(Piece::new(PieceKind::Rook, Color::White)); // a2
        squares[1][1] = Some(Piece::new(PieceKind::Bishop, Color::White)); // b2
        squares[1][2] = Some(Piece::new(PieceKind::Knight, Color::White)); // c2
        squares[1][5] = Some(Piece::new(PieceKind::Knight, Color::Black)); // f2
        squares[1][6] = Some(Piece::new(PieceKind::Bishop, Color::Black)); // g2
        squares[1][7] = Some(Piece::new(PieceKind::Rook, Color::Black)); // h2

        Board { squares }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.rank()][sq.file()] = piece;
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }
}

/// Textual rendering: rank 8 at the top, rank numbers on the left, file
/// letters underneath, ".." for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8usize).rev() {
            write!(f, "{}", rank + 1)?;
            for file in 0..8usize {
                match self.squares[rank][file] {
                    Some(p) => write!(f, " {p}")?,
                    None => write!(f, " ..")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a  b  c  d  e  f  g  h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    #[test]
    fn starting_layout_matches_race_setup() {
        let board = Board::new();
        let expect = [
            ("a1", "WK"), ("b1", "WB"), ("c1", "WN"),
            ("f1", "BN"), ("g1", "BB"), ("h1", "BK"),
            ("a2", "WR"), ("b2", "WB"), ("c2", "WN"),
            ("f2", "BN"), ("g2", "BB"), ("h2", "BR"),
        ];
        for (pos, code) in expect {
            let piece = board.piece_at(sq(pos));
            assert_eq!(piece.map(|p| p.to_string()).as_deref(), Some(code), "at {pos}");
        }
        for pos in ["d1", "e1", "d2", "e2", "a3", "h8"] {
            assert!(board.piece_at(sq(pos)).is_none(), "{pos} should start empty");
        }
        assert_eq!(board.pieces().count(), 12);
    }

    #[test]
    fn finds_both_kings() {
        let board = Board::new();
        assert_eq!(board.find_king(Color::White), Some(sq("a1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("h1")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn set_and_read_back() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        board.set(sq("e5"), Some(rook));
        assert_eq!(board.piece_at(sq("e5")), Some(rook));
        board.set(sq("e5"), None);
        assert_eq!(board.piece_at(sq("e5")), None);
    }

    #[test]
    fn render_puts_rank_8_on_top() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with('8'));
        assert_eq!(lines[7], "1 WK WB WN .. .. BN BB BK");
        assert_eq!(lines[8], "  a  b  c  d  e  f  g  h");
    }
}
