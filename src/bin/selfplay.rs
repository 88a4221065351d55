//! Random-playout smoke run: both sides pick uniformly random legal moves
//! until the race is decided or the ply cap is hit. Pass --json for a
//! machine-readable game record.

use rand::seq::SliceRandom;
use serde::Serialize;

use chessrace::game::{Game, GameState};

const MAX_PLIES: u32 = 300;

#[derive(Serialize)]
struct GameRecord {
    plies: u32,
    result: GameState,
    moves: Vec<String>,
}

fn main() {
    let json = std::env::args().any(|a| a == "--json");

    let mut rng = rand::thread_rng();
    let mut game = Game::new();
    let mut record = Vec::new();
    let mut plies = 0;

    while game.state() == GameState::InProgress && plies < MAX_PLIES {
        let moves = game.legal_moves(game.turn());
        let Some(mv) = moves.choose(&mut rng) else {
            eprintln!("{:?} has no legal moves after {plies} plies", game.turn());
            break;
        };
        if game.make_move(mv.from, mv.to) {
            record.push(mv.to_coords());
            plies += 1;
        }
    }

    if json {
        let summary = GameRecord {
            plies,
            result: game.state(),
            moves: record,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("failed to serialize game record: {e}"),
        }
    } else {
        eprintln!("Game over after {plies} plies: {:?}", game.state());
    }
}
