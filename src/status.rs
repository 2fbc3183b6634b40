use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::check::is_king_attacked;
use crate::history::History;
use crate::movegen::has_any_legal_move;
use crate::piece::Color;

/// Placements seen this many times end the game.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
}

impl GameStatus {
    /// Terminal positions accept no moves, only undo or a new game.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate by {winner}!"),
            GameStatus::Stalemate => write!(f, "Stalemate"),
            GameStatus::DrawByRepetition => write!(f, "Draw by repetition"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assessment {
    pub status: GameStatus,
    /// Whether the side to move is in check. Orthogonal to `status`.
    pub in_check: bool,
}

/// Classify the position for `to_move`. Checkmate and stalemate take
/// precedence over repetition.
pub fn assess(board: &Board, to_move: Color, history: &History) -> Assessment {
    let in_check = is_king_attacked(board, to_move, history);
    let status = if !has_any_legal_move(board, to_move, history) {
        if in_check {
            GameStatus::Checkmate { winner: to_move.opposite() }
        } else {
            GameStatus::Stalemate
        }
    } else if is_threefold_repetition(board, history) {
        GameStatus::DrawByRepetition
    } else {
        GameStatus::Ongoing
    };
    Assessment { status, in_check }
}

/// True once the current placement has occurred three times, counting the
/// current board. Whose turn it is does not matter.
pub fn is_threefold_repetition(board: &Board, history: &History) -> bool {
    history.occurrences(board) + 1 >= REPETITION_LIMIT
}
