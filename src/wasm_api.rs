use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{Game, GameState, MoveError};
use crate::moves::Square;
use crate::piece::{Color, Piece, PieceKind};

#[derive(Serialize)]
struct SquarePiece {
    kind: String,
    color: String,
}

#[derive(Serialize)]
struct MoveJson {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    turn: String,
    game_state: String,
    white_pending_win: bool,
    legal_moves: Vec<MoveJson>,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn kind_to_string(kind: PieceKind) -> String {
    match kind {
        PieceKind::King => "King".to_string(),
        PieceKind::Rook => "Rook".to_string(),
        PieceKind::Knight => "Knight".to_string(),
        PieceKind::Bishop => "Bishop".to_string(),
    }
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

fn state_to_string(state: GameState) -> String {
    match state {
        GameState::InProgress => "InProgress".to_string(),
        GameState::WhiteWon => "WhiteWon".to_string(),
        GameState::BlackWon => "BlackWon".to_string(),
        GameState::Tie => "Tie".to_string(),
    }
}

fn square_piece(p: Piece) -> SquarePiece {
    SquarePiece {
        kind: kind_to_string(p.kind),
        color: color_to_string(p.color),
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| game.board().squares[r][c].map(square_piece))
                .collect()
        })
        .collect();

    let legal_moves: Vec<MoveJson> = game
        .legal_moves(game.turn())
        .iter()
        .map(|m| MoveJson {
            from: m.from.to_string(),
            to: m.to.to_string(),
        })
        .collect();

    BoardState {
        squares,
        turn: color_to_string(game.turn()),
        game_state: state_to_string(game.state()),
        white_pending_win: game.white_pending_win(),
        legal_moves,
    }
}

fn error_result(message: &str) -> JsValue {
    let err = MoveResult {
        board_state: None,
        error: Some(message.to_string()),
    };
    serde_wasm_bindgen::to_value(&err).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct RaceGame {
    game: Game,
}

#[wasm_bindgen]
impl RaceGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RaceGame {
        RaceGame { game: Game::new() }
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.game);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    /// Attempt a move given coordinate strings like "a2" / "a5". Returns the
    /// updated board state, or an error payload for malformed coordinates
    /// and illegal moves.
    pub fn make_move(&mut self, from: &str, to: &str) -> JsValue {
        let (from, to) = match (Square::parse(from), Square::parse(to)) {
            (Some(f), Some(t)) => (f, t),
            _ => return error_result("Squares are a file letter a-h and a rank digit 1-8"),
        };

        match self.game.try_move(from, to) {
            Ok(()) => {
                let state = build_board_state(&self.game);
                serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
            }
            Err(MoveError::GameOver) => error_result("Game is already over"),
            Err(e) => error_result(&format!("Illegal move: {e}")),
        }
    }

    pub fn legal_moves_for_square(&self, square: &str) -> JsValue {
        let from = match Square::parse(square) {
            Some(sq) => sq,
            None => return JsValue::NULL,
        };
        let targets: Vec<String> = self
            .game
            .legal_moves(self.game.turn())
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to.to_string())
            .collect();
        serde_wasm_bindgen::to_value(&targets).unwrap_or(JsValue::NULL)
    }
}
