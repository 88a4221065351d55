use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. Files a–h map to 0–7, ranks 1–8 map to 0–7.
/// Construction is bounds-checked, so a `Square` always names a real square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: i32, rank: i32) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Parse coordinate notation, e.g. "a1" or "h8". Anything outside
    /// `[a-h][1-8]` is rejected here, before it can reach the rules.
    pub fn parse(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0] as i32 - 'a' as i32;
        let rank = bytes[1] as i32 - '1' as i32;
        Square::new(file, rank)
    }

    pub fn file(&self) -> usize {
        self.file as usize
    }

    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    /// The square `dfile` files and `drank` ranks away, if it is on the board.
    pub fn offset(&self, dfile: i32, drank: i32) -> Option<Square> {
        Square::new(self.file as i32 + dfile, self.rank as i32 + drank)
    }

    /// All 64 squares, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Coordinate-pair notation, e.g. "a2a5".
    pub fn to_coords(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse coordinate-pair notation.
    pub fn from_coords(s: &str) -> Option<Move> {
        if s.len() != 4 {
            return None;
        }
        let from = Square::parse(s.get(..2)?)?;
        let to = Square::parse(s.get(2..)?)?;
        Some(Move { from, to })
    }
}
