//! Errors returned by [`crate::game::GameState`] operations.
//!
//! Every operation that returns an error leaves the game state exactly as it
//! was, so a caller that only re-renders may ignore it.

use crate::board::Square;
use crate::moves::square_name;
use crate::piece::PieceType;
use crate::status::GameStatus;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// The game has reached a terminal status.
    #[error("Game is already over: {0}")]
    GameOver(GameStatus),

    /// A pawn is waiting on the last rank for its replacement.
    #[error("A promotion piece must be chosen first")]
    PromotionPending,

    #[error("No promotion is pending")]
    NoPromotionPending,

    #[error("Cannot promote to {0}")]
    InvalidPromotion(PieceType),

    /// Empty square, or a piece of the side not to move.
    #[error("No piece of the side to move on {}", name(.square))]
    NotSelectable { square: Square },

    #[error("Illegal move: {} to {}", name(.from), name(.to))]
    IllegalMove { from: Square, to: Square },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("It is not the computer's turn")]
    NotAutomatedTurn,

    #[error("No legal moves available")]
    NoLegalMoves,
}

fn name(sq: &Square) -> String {
    square_name(*sq)
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
