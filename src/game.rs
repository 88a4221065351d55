use std::error::Error;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::moves::{Move, Square};
use crate::piece::{Color, PieceKind};
use crate::rules;

/// Outcome of the race. Monotonic: once the state leaves `InProgress` it
/// never changes again.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    WhiteWon,
    BlackWon,
    Tie,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        *self != GameState::InProgress
    }
}

/// Why a move was rejected. An illegal move is a normal outcome, not a
/// fault; `make_move` collapses this to pass/fail for callers that only
/// need the reference contract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    GameOver,
    NoPiece,
    WrongTurn,
    OwnPiece,
    KingCapture,
    BadGeometry,
    ExposedKing,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveError::GameOver => "the game is already over",
            MoveError::NoPiece => "no piece on the start square",
            MoveError::WrongTurn => "it is the other player's turn",
            MoveError::OwnPiece => "the destination holds a piece of the same color",
            MoveError::KingCapture => "kings cannot be captured",
            MoveError::BadGeometry => "that piece cannot reach the destination",
            MoveError::ExposedKing => "the move would leave a king attacked",
        };
        f.write_str(msg)
    }
}

impl Error for MoveError {}

/// One game of the race variant. Owns the board and the turn/outcome state
/// machine; every mutation goes through `try_move`.
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
    white_pending_win: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Game {
        Game::from_position(Board::new(), Color::White)
    }

    /// Start from an arbitrary position. Used for tests and analysis setups.
    pub fn from_position(board: Board, turn: Color) -> Game {
        Game {
            board,
            turn,
            state: GameState::InProgress,
            white_pending_win: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// White's king has reached rank 8 and the win awaits Black's one reply.
    pub fn white_pending_win(&self) -> bool {
        self.white_pending_win
    }

    /// The reference contract: attempt a move, report pass/fail. On failure
    /// nothing changes — not the board, not the turn, not the outcome.
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Like `make_move` but says why a move was rejected.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece)?;
        if piece.color != self.turn {
            return Err(MoveError::WrongTurn);
        }
        self.check_move(from, to)?;

        // Commit. Whatever occupied the destination is discarded.
        self.board.set(to, Some(piece));
        self.board.set(from, None);

        // Kings reaching the far rank drive the race outcome. White's
        // arrival is provisional so a same-turn-pair tie can be detected;
        // Black's is final immediately, since no reply is owed to White.
        if piece.kind == PieceKind::King && to.rank() == 7 {
            match piece.color {
                Color::White => {
                    self.white_pending_win = true;
                    debug!("white king reached {to}, win pending black's reply");
                }
                Color::Black => {
                    self.state = if self.white_pending_win {
                        GameState::Tie
                    } else {
                        GameState::BlackWon
                    };
                }
            }
        }

        self.turn = self.turn.opposite();

        // One-ply-delayed confirmation: White's arrival stands once Black's
        // reply neither reached the far rank itself nor produced a tie.
        if self.turn == Color::White
            && self.white_pending_win
            && self.state == GameState::InProgress
        {
            self.state = GameState::WhiteWon;
        }

        if self.state.is_over() {
            debug!("game over: {:?}", self.state);
        }
        Ok(())
    }

    /// Full legality minus the turn check: destination occupancy, the
    /// king-capture ban, movement geometry, and the constraint that no move
    /// may leave either king attacked.
    fn check_move(&self, from: Square, to: Square) -> Result<(), MoveError> {
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece)?;
        if let Some(target) = self.board.piece_at(to) {
            if target.color == piece.color {
                return Err(MoveError::OwnPiece);
            }
            // Kings are never a legal destination. The self-check rule
            // would miss some king captures (a board with no king reports
            // no check), so the ban is explicit.
            if target.kind == PieceKind::King {
                return Err(MoveError::KingCapture);
            }
        }
        if !rules::is_geometric(&self.board, from, to) {
            return Err(MoveError::BadGeometry);
        }

        // Probe the resulting position on a copy so the live board never
        // holds the hypothetical state, whatever the answer.
        let mut probe = self.board.clone();
        probe.set(to, Some(piece));
        probe.set(from, None);
        if rules::is_in_check(&probe, Color::White) || rules::is_in_check(&probe, Color::Black) {
            return Err(MoveError::ExposedKing);
        }
        Ok(())
    }

    /// All fully legal moves for `color` in the current position, ignoring
    /// whose turn it is.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            for to in Square::all() {
                if self.check_move(from, to).is_ok() {
                    moves.push(Move { from, to });
                }
            }
        }
        moves
    }
}
