//! Append-only record of past positions.
//!
//! Castling rights and en-passant eligibility are never cached. They are
//! recomputed from these snapshots on every query, so undo cannot leave a
//! stale "has moved" flag behind.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::piece::{Color, Piece};

/// One committed move, as seen just before it was played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Placement before the move.
    pub board: Board,
    /// Side that made the move.
    pub turn: Color,
    /// Origin square of the move.
    pub selected: Option<Square>,
    /// Legal destinations that were offered for `selected`.
    pub moves: Vec<Square>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    /// A copy of this history with one more entry, for "what if" simulations.
    pub fn extended(&self, entry: HistoryEntry) -> History {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    /// True if `piece` stood on `square` in every recorded position.
    ///
    /// A piece that ever left its square is missing from the snapshot taken
    /// after it moved (or from the current board, which the caller checks).
    pub fn never_left(&self, square: Square, piece: Piece) -> bool {
        self.entries.iter().all(|e| e.board.get(square) == Some(piece))
    }

    /// True if `color` ever moved a piece off `square`.
    pub fn moved_from(&self, color: Color, square: Square) -> bool {
        self.entries
            .iter()
            .any(|e| e.turn == color && e.selected == Some(square))
    }

    /// Number of recorded positions with exactly this placement.
    pub fn occurrences(&self, board: &Board) -> usize {
        self.entries.iter().filter(|e| e.board == *board).count()
    }
}
