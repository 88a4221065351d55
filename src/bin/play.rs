use std::io::{self, BufRead, Write};

use env_logger::Env;

use chessrace::game::{Game, GameState};
use chessrace::moves::Square;
use chessrace::piece::Color;

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

/// Prompt and read one trimmed line. None means EOF (or a read error),
/// which ends the session.
fn read_line(prompt: &str, lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

fn main() {
    let env = Env::default().filter_or("CHESSRACE_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    println!(
        "chessrace {} (built {}) — first king to the far rank wins",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIMESTAMP")
    );

    let mut game = Game::new();
    print!("{}", game.board());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while game.state() == GameState::InProgress {
        let prompt = format!(
            "{}'s turn. Enter start position (e.g. 'a2'): ",
            color_name(game.turn())
        );
        let Some(start_text) = read_line(&prompt, &mut lines) else {
            break;
        };
        let Some(start) = Square::parse(&start_text) else {
            println!("Squares are a file letter a-h and a rank digit 1-8, e.g. 'a2'.");
            continue;
        };
        let Some(end_text) = read_line("Enter end position (e.g. 'a3'): ", &mut lines) else {
            break;
        };
        let Some(end) = Square::parse(&end_text) else {
            println!("Squares are a file letter a-h and a rank digit 1-8, e.g. 'a2'.");
            continue;
        };

        match game.try_move(start, end) {
            Ok(()) => print!("{}", game.board()),
            Err(e) => println!("Invalid move: {e}. Please try again."),
        }
    }

    match game.state() {
        GameState::WhiteWon => println!("WHITE WON!"),
        GameState::BlackWon => println!("BLACK WON!"),
        GameState::Tie => println!("It's a tie!"),
        GameState::InProgress => println!("Game abandoned."),
    }
}
