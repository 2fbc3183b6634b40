use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceType};

/// A `(row, col)` pair. Row 0 is White's back rank, col 0 is the a-file.
pub type Square = (usize, usize);

/// Non-king pieces each side starts with, used for the captured tally.
const STARTING_SET: [(PieceType, u32); 5] = [
    (PieceType::Queen, 1),
    (PieceType::Rook, 2),
    (PieceType::Bishop, 2),
    (PieceType::Knight, 2),
    (PieceType::Pawn, 8),
];

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Piece placement only. Turn, history and game status live in
/// [`crate::game::GameState`], so two boards are equal exactly when their
/// placements are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(pt, Color::White));
            board.squares[1][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.squares[7][col] = Some(Piece::new(pt, Color::Black));
        }
        board
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    /// The square `(dr, dc)` away from `sq`, if it is on the board.
    pub fn offset(sq: Square, dr: i32, dc: i32) -> Option<Square> {
        let r = sq.0 as i32 + dr;
        let c = sq.1 as i32 + dc;
        Self::in_bounds(r, c).then(|| (r as usize, c as usize))
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.0][sq.1]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.0][sq.1] = piece;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// Builder used by tests and custom setups.
    pub fn with(mut self, sq: Square, piece_type: PieceType, color: Color) -> Self {
        self.set(sq, Some(Piece::new(piece_type, color)));
        self
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.piece_type == PieceType::King)
            .map(|(sq, _)| sq)
    }

    /// Every piece of `color` with its square, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8)
            .flat_map(|r| (0..8).map(move |c| (r, c)))
            .filter_map(move |sq| match self.get(sq) {
                Some(p) if p.color == color => Some((sq, p)),
                _ => None,
            })
    }

    /// How many of `color`'s pieces of each kind have left the board,
    /// compared with the starting set. Kinds with nothing missing are omitted.
    pub fn captured(&self, color: Color) -> Vec<(PieceType, u32)> {
        STARTING_SET
            .iter()
            .filter_map(|&(pt, initial)| {
                let on_board = self.pieces(color).filter(|(_, p)| p.piece_type == pt).count() as u32;
                let missing = initial.saturating_sub(on_board);
                (missing > 0).then_some((pt, missing))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_placement() {
        let board = Board::new();
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert_eq!(board.find_king(Color::White), Some((0, 4)));
        assert_eq!(board.find_king(Color::Black), Some((7, 4)));
        assert_eq!(board.get((7, 3)), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert!(board.is_empty((4, 4)));
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Board::offset((0, 0), 1, 2), Some((1, 2)));
        assert_eq!(Board::offset((0, 0), -1, 0), None);
        assert_eq!(Board::offset((7, 7), 0, 1), None);
    }

    #[test]
    fn captured_tally_counts_missing_pieces() {
        let mut board = Board::new();
        assert!(board.captured(Color::Black).is_empty());

        board.set((7, 3), None);
        board.set((6, 0), None);
        board.set((6, 1), None);
        let captured = board.captured(Color::Black);
        assert_eq!(captured, vec![(PieceType::Queen, 1), (PieceType::Pawn, 2)]);
        assert!(board.captured(Color::White).is_empty());
    }

    #[test]
    fn captured_tally_never_negative_after_promotion() {
        // A promoted pawn leaves two white queens on the board.
        let board = Board::new().with((4, 4), PieceType::Queen, Color::White);
        assert!(board.captured(Color::White).is_empty());
    }
}
