//! Applies a move to a board, including the extra squares touched by
//! castling, en passant and promotion.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::history::{History, HistoryEntry};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Capture { square: Square, piece: Piece },
    EnPassant { captured: Square },
    Castle { rook_from: Square, rook_to: Square },
    Promotion { square: Square, piece_type: PieceType },
    /// A pawn reached the last rank but no replacement was given.
    PromotionPending { square: Square },
}

#[derive(Clone, Debug)]
pub struct Applied {
    pub board: Board,
    pub effects: Vec<Effect>,
}

impl Applied {
    /// The piece removed from the board by this move, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.effects.iter().find_map(|e| match e {
            Effect::Capture { piece, .. } => Some(*piece),
            _ => None,
        })
    }

    pub fn promoted_to(&self) -> Option<PieceType> {
        self.effects.iter().find_map(|e| match e {
            Effect::Promotion { piece_type, .. } => Some(*piece_type),
            _ => None,
        })
    }
}

/// True if moving the piece on `from` to `to` is a pawn reaching its last rank.
pub fn is_promotion(board: &Board, from: Square, to: Square) -> bool {
    board
        .get(from)
        .map(|p| p.piece_type == PieceType::Pawn && to.0 == p.color.promotion_row())
        .unwrap_or(false)
}

/// Apply `mv` to a copy of `board`. The move is assumed geometrically valid;
/// an empty origin leaves the board unchanged.
pub fn apply_move(board: &Board, mv: &Move) -> Applied {
    let mut next = *board;
    let mut effects = Vec::new();
    let (from, to) = (mv.from, mv.to);

    let piece = match board.get(from) {
        Some(p) => p,
        None => return Applied { board: next, effects },
    };

    if let Some(victim) = board.get(to) {
        effects.push(Effect::Capture { square: to, piece: victim });
    }

    // A pawn moving diagonally onto an empty square takes the pawn it passed.
    if piece.piece_type == PieceType::Pawn && from.1 != to.1 && board.is_empty(to) {
        let captured = (from.0, to.1);
        if let Some(victim) = board.get(captured) {
            effects.push(Effect::Capture { square: captured, piece: victim });
        }
        effects.push(Effect::EnPassant { captured });
        next.set(captured, None);
    }

    next.set(to, Some(piece));
    next.set(from, None);

    if piece.piece_type == PieceType::King {
        let col_diff = to.1 as i32 - from.1 as i32;
        let rook_cols = match col_diff {
            2 => Some((7, 5)),
            -2 => Some((0, 3)),
            _ => None,
        };
        if let Some((rook_col, landing_col)) = rook_cols {
            let rook_from = (from.0, rook_col);
            let rook_to = (from.0, landing_col);
            next.set(rook_to, next.get(rook_from));
            next.set(rook_from, None);
            effects.push(Effect::Castle { rook_from, rook_to });
        }
    }

    if piece.piece_type == PieceType::Pawn && to.0 == piece.color.promotion_row() {
        match mv.promotion {
            Some(pt) => {
                next.set(to, Some(Piece::new(pt, piece.color)));
                effects.push(Effect::Promotion { square: to, piece_type: pt });
            }
            None => effects.push(Effect::PromotionPending { square: to }),
        }
    }

    Applied { board: next, effects }
}

/// Commit `mv` for `turn`: record the pre-move position in `history`, then
/// return the resulting board.
pub fn execute(
    board: &Board,
    turn: Color,
    mv: &Move,
    offered: Vec<Square>,
    history: &mut History,
) -> Applied {
    history.push(HistoryEntry {
        board: *board,
        turn,
        selected: Some(mv.from),
        moves: offered,
    });
    apply_move(board, mv)
}
