use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::piece::PieceType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece chosen for a pawn reaching the last rank. `None` for every other
    /// move, and for a promotion whose piece has not been chosen yet.
    pub promotion: Option<PieceType>,
}

/// Algebraic name of a square, e.g. `(0, 4)` is "e1".
pub fn square_name(sq: Square) -> String {
    let file = (b'a' + sq.1 as u8) as char;
    let rank = (b'1' + sq.0 as u8) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic square name such as "e4".
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].checked_sub(b'a')? as usize;
    let row = bytes[1].checked_sub(b'1')? as usize;
    (row < 8 && col < 8).then_some((row, col))
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to, promotion: None }
    }

    /// Convert to UCI notation, e.g. "e2e4", "a7a8q"
    pub fn to_uci(&self) -> String {
        let promo = match self.promotion {
            Some(PieceType::Queen) => "q",
            Some(PieceType::Rook) => "r",
            Some(PieceType::Bishop) => "b",
            Some(PieceType::Knight) => "n",
            _ => "",
        };
        format!("{}{}{promo}", square_name(self.from), square_name(self.to))
    }

    /// Parse from UCI notation
    pub fn from_uci(s: &str) -> Option<Move> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = parse_square(&s[0..2])?;
        let to = parse_square(&s[2..4])?;
        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(PieceType::Queen),
            Some(b'r') => Some(PieceType::Rook),
            Some(b'b') => Some(PieceType::Bishop),
            Some(b'n') => Some(PieceType::Knight),
            Some(_) => return None,
        };
        Some(Move { from, to, promotion })
    }
}
