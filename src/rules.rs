//! Stateless movement and attack rules.
//!
//! Everything here is a pure read-only query against a board. The
//! turn-order, capture and king-safety constraints live in the game
//! controller; these functions answer only "can this piece reach that
//! square by its movement rule".

use crate::board::Board;
use crate::moves::Square;
use crate::piece::{Color, PieceKind};

/// Geometry-only legality: does the piece on `from` reach `to` by its
/// movement rule, with sliding paths unobstructed? Ignores whose turn it
/// is, what occupies the destination, and any check considerations.
pub fn is_geometric(board: &Board, from: Square, to: Square) -> bool {
    // A null move never passes geometry. The sliding-path scan below is
    // exclusive of both endpoints and would vacuously accept from == to.
    if from == to {
        return false;
    }
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return false,
    };

    let dfile = to.file() as i32 - from.file() as i32;
    let drank = to.rank() as i32 - from.rank() as i32;

    match piece.kind {
        PieceKind::King => dfile.abs() <= 1 && drank.abs() <= 1,
        PieceKind::Rook => (dfile == 0) != (drank == 0) && path_clear(board, from, to),
        PieceKind::Knight => {
            let (df, dr) = (dfile.abs(), drank.abs());
            (df == 1 && dr == 2) || (df == 2 && dr == 1)
        }
        PieceKind::Bishop => dfile.abs() == drank.abs() && path_clear(board, from, to),
    }
}

/// Every square strictly between `from` and `to` must be empty. The two
/// squares must already share a rank, file or diagonal; the walk then
/// always lands exactly on `to`.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dfile = (to.file() as i32 - from.file() as i32).signum();
    let drank = (to.rank() as i32 - from.rank() as i32).signum();

    let mut step = from.offset(dfile, drank);
    while let Some(sq) = step {
        if sq == to {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        step = sq.offset(dfile, drank);
    }
    false
}

/// True if any piece of `attacker` could move to `target` by geometry
/// alone. Occupancy of `target` itself cannot interfere: the path scan is
/// exclusive of both endpoints, so this behaves as if `target` were vacant.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces()
        .any(|(sq, piece)| piece.color == attacker && is_geometric(board, sq, target))
}

/// Is `color`'s king currently attacked? A board with no such king reports
/// not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn board_with(pieces: &[(&str, PieceKind, Color)]) -> Board {
        let mut board = Board::empty();
        for &(pos, kind, color) in pieces {
            board.set(sq(pos), Some(Piece::new(kind, color)));
        }
        board
    }

    #[test]
    fn king_moves_one_step_any_direction() {
        let board = board_with(&[("d4", PieceKind::King, Color::White)]);
        for to in ["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"] {
            assert!(is_geometric(&board, sq("d4"), sq(to)), "d4 -> {to}");
        }
        for to in ["d6", "f4", "b2", "h8"] {
            assert!(!is_geometric(&board, sq("d4"), sq(to)), "d4 -> {to} is too far");
        }
    }

    #[test]
    fn rook_moves_straight_lines_only() {
        let board = board_with(&[("d4", PieceKind::Rook, Color::White)]);
        assert!(is_geometric(&board, sq("d4"), sq("d8")));
        assert!(is_geometric(&board, sq("d4"), sq("a4")));
        assert!(!is_geometric(&board, sq("d4"), sq("e5")), "rooks cannot move diagonally");
        assert!(!is_geometric(&board, sq("d4"), sq("e6")));
    }

    #[test]
    fn rook_is_blocked_by_any_interposed_piece() {
        let mut board = board_with(&[("a2", PieceKind::Rook, Color::White)]);
        assert!(is_geometric(&board, sq("a2"), sq("a5")));

        // A blocker of either color at a3 closes the path; removing it
        // restores legality.
        for color in [Color::White, Color::Black] {
            board.set(sq("a3"), Some(Piece::new(PieceKind::Knight, color)));
            assert!(!is_geometric(&board, sq("a2"), sq("a5")), "blocked by {color:?} piece");
            board.set(sq("a3"), None);
            assert!(is_geometric(&board, sq("a2"), sq("a5")));
        }
    }

    #[test]
    fn knight_moves_in_l_shape_and_jumps() {
        let board = board_with(&[
            ("d4", PieceKind::Knight, Color::White),
            // Ring of pieces surrounding the knight; it jumps over all of them.
            ("c3", PieceKind::Rook, Color::White),
            ("c4", PieceKind::Rook, Color::Black),
            ("c5", PieceKind::Rook, Color::White),
            ("d3", PieceKind::Rook, Color::Black),
            ("d5", PieceKind::Rook, Color::White),
            ("e3", PieceKind::Rook, Color::Black),
            ("e4", PieceKind::Rook, Color::White),
            ("e5", PieceKind::Rook, Color::Black),
        ]);
        for to in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
            assert!(is_geometric(&board, sq("d4"), sq(to)), "d4 -> {to}");
        }
        for to in ["d6", "e5", "f4", "b4"] {
            assert!(!is_geometric(&board, sq("d4"), sq(to)), "d4 -> {to} is not an L");
        }
    }

    #[test]
    fn bishop_moves_diagonals_and_respects_blockers() {
        let mut board = board_with(&[("c1", PieceKind::Bishop, Color::White)]);
        assert!(is_geometric(&board, sq("c1"), sq("h6")));
        assert!(!is_geometric(&board, sq("c1"), sq("c4")), "bishops cannot move straight");
        assert!(!is_geometric(&board, sq("c1"), sq("d3")));

        board.set(sq("e3"), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert!(!is_geometric(&board, sq("c1"), sq("h6")), "e3 blocks the diagonal");
        assert!(is_geometric(&board, sq("c1"), sq("d2")), "short of the blocker is fine");
    }

    #[test]
    fn null_move_is_rejected_for_every_kind() {
        for kind in [
            PieceKind::King,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
        ] {
            let board = board_with(&[("d4", kind, Color::White)]);
            assert!(!is_geometric(&board, sq("d4"), sq("d4")), "{kind:?} null move");
        }
    }

    #[test]
    fn empty_start_square_is_never_geometric() {
        let board = Board::empty();
        assert!(!is_geometric(&board, sq("a1"), sq("a2")));
    }

    #[test]
    fn detects_rook_check_along_open_file() {
        let mut board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("e8", PieceKind::Rook, Color::Black),
        ]);
        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));

        // Interposing any piece lifts the check.
        board.set(sq("e4"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn detects_knight_and_bishop_checks() {
        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("d3", PieceKind::Knight, Color::Black),
        ]);
        assert!(is_in_check(&board, Color::White));

        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("a5", PieceKind::Bishop, Color::Black),
        ]);
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    fn own_pieces_never_give_check() {
        let board = board_with(&[
            ("e1", PieceKind::King, Color::White),
            ("e8", PieceKind::Rook, Color::White),
        ]);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn missing_king_reports_not_in_check() {
        let board = board_with(&[("e8", PieceKind::Rook, Color::Black)]);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn attack_detection_ignores_target_occupancy() {
        // The black rook "attacks" e1 whether e1 is empty or holds the
        // white king — path scanning never inspects the endpoints.
        let mut board = board_with(&[("e8", PieceKind::Rook, Color::Black)]);
        assert!(is_square_attacked(&board, sq("e1"), Color::Black));
        board.set(sq("e1"), Some(Piece::new(PieceKind::King, Color::White)));
        assert!(is_square_attacked(&board, sq("e1"), Color::Black));
    }
}
