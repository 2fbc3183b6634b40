//! Destination squares per piece, and the filter that removes moves leaving
//! the mover's own king attacked.
//!
//! [`generate`] takes a `skip_self_check` flag instead of having a second
//! code path for attack scans. With the flag set it returns raw geometry and
//! never offers castling, which is what [`crate::check`] needs; without it,
//! every candidate is simulated and kept only if the king is safe afterwards.

use crate::board::{Board, Square};
use crate::check::is_king_attacked;
use crate::executor::apply_move;
use crate::history::{History, HistoryEntry};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceType};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

const ROOK_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRS: [(i32, i32); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

struct CastleSide {
    rook_col: usize,
    /// Columns that must be empty between king and rook.
    between: &'static [usize],
    /// Columns the king crosses or lands on; none may be attacked.
    transit: [usize; 2],
    landing: usize,
}

const CASTLE_SIDES: [CastleSide; 2] = [
    CastleSide { rook_col: 7, between: &[5, 6], transit: [5, 6], landing: 6 },
    CastleSide { rook_col: 0, between: &[1, 2, 3], transit: [3, 2], landing: 2 },
];

const KING_HOME_COL: usize = 4;

/// Destination squares for the piece on `origin`.
///
/// Returns nothing if `origin` is empty or holds a piece not belonging to
/// `side`. With `skip_self_check` the result is pure geometry (no castling,
/// no king-safety filter).
pub fn generate(
    board: &Board,
    origin: Square,
    side: Color,
    history: &History,
    skip_self_check: bool,
) -> Vec<Square> {
    let piece = match board.get(origin) {
        Some(p) if p.color == side => p,
        _ => return Vec::new(),
    };

    let mut targets = Vec::new();
    match piece.piece_type {
        PieceType::Pawn => pawn_targets(board, origin, side, history, &mut targets),
        PieceType::Knight => step_targets(board, origin, side, &KNIGHT_OFFSETS, &mut targets),
        PieceType::Bishop => sliding_targets(board, origin, side, &BISHOP_DIRS, &mut targets),
        PieceType::Rook => sliding_targets(board, origin, side, &ROOK_DIRS, &mut targets),
        PieceType::Queen => sliding_targets(board, origin, side, &QUEEN_DIRS, &mut targets),
        PieceType::King => {
            step_targets(board, origin, side, &KING_OFFSETS, &mut targets);
            if !skip_self_check {
                castling_targets(board, origin, side, history, &mut targets);
            }
        }
    }

    if !skip_self_check {
        targets.retain(|&to| leaves_king_safe(board, origin, to, side, history));
    }
    targets
}

/// Legal destinations for the piece on `origin`.
pub fn legal_moves(board: &Board, origin: Square, side: Color, history: &History) -> Vec<Square> {
    generate(board, origin, side, history, false)
}

/// Every legal move for `side`. Promotions come back with `promotion: None`.
pub fn legal_moves_for_side(board: &Board, side: Color, history: &History) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|(from, _)| {
            legal_moves(board, from, side, history)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

pub fn has_any_legal_move(board: &Board, side: Color, history: &History) -> bool {
    board
        .pieces(side)
        .any(|(from, _)| !legal_moves(board, from, side, history).is_empty())
}

/// Play `origin -> to` on a scratch board and report whether `side`'s king
/// is safe afterwards.
pub fn leaves_king_safe(
    board: &Board,
    origin: Square,
    to: Square,
    side: Color,
    history: &History,
) -> bool {
    let after = apply_move(board, &Move::new(origin, to)).board;
    !is_king_attacked(&after, side, history)
}

fn pawn_targets(
    board: &Board,
    origin: Square,
    side: Color,
    history: &History,
    targets: &mut Vec<Square>,
) {
    let dir = side.pawn_dir();

    if let Some(one) = Board::offset(origin, dir, 0) {
        if board.is_empty(one) {
            targets.push(one);
            if origin.0 == side.pawn_start_row() {
                if let Some(two) = Board::offset(origin, 2 * dir, 0) {
                    if board.is_empty(two) {
                        targets.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diag) = Board::offset(origin, dir, dc) {
            if board.color_at(diag) == Some(side.opposite()) {
                targets.push(diag);
            }
        }
    }

    if let Some(last) = history.last() {
        for dc in [-1, 1] {
            if let Some(landing) = en_passant_target(board, origin, side, last, dc) {
                targets.push(landing);
            }
        }
    }
}

/// Landing square of an en-passant capture towards column offset `dc`, if the
/// move recorded in `last` was an enemy pawn double-stepping beside `origin`.
fn en_passant_target(
    board: &Board,
    origin: Square,
    side: Color,
    last: &HistoryEntry,
    dc: i32,
) -> Option<Square> {
    if origin.0 != side.en_passant_row() || last.turn != side.opposite() {
        return None;
    }
    let dir = side.pawn_dir();
    let enemy = Piece::new(PieceType::Pawn, side.opposite());
    let beside = Board::offset(origin, 0, dc)?;
    let landing = Board::offset(origin, dir, dc)?;
    let start = Board::offset(origin, 2 * dir, dc)?;

    let double_stepped = last.board.get(start) == Some(enemy)
        && last.board.is_empty(landing)
        && last.board.is_empty(beside)
        && board.is_empty(start);

    (double_stepped && board.get(beside) == Some(enemy) && board.is_empty(landing))
        .then_some(landing)
}

fn step_targets(
    board: &Board,
    origin: Square,
    side: Color,
    offsets: &[(i32, i32)],
    targets: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = Board::offset(origin, dr, dc) {
            if board.color_at(to) != Some(side) {
                targets.push(to);
            }
        }
    }
}

fn sliding_targets(
    board: &Board,
    origin: Square,
    side: Color,
    directions: &[(i32, i32)],
    targets: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut cur = origin;
        while let Some(to) = Board::offset(cur, dr, dc) {
            match board.color_at(to) {
                None => targets.push(to),
                Some(c) => {
                    if c != side {
                        targets.push(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

/// True if `piece` is on `square` now and has been there in every position
/// of the game so far.
fn unmoved(board: &Board, history: &History, square: Square, piece: Piece) -> bool {
    board.get(square) == Some(piece)
        && history.never_left(square, piece)
        && !history.moved_from(piece.color, square)
}

fn castling_targets(
    board: &Board,
    origin: Square,
    side: Color,
    history: &History,
    targets: &mut Vec<Square>,
) {
    let rank = side.back_rank();
    let king = Piece::new(PieceType::King, side);
    let rook = Piece::new(PieceType::Rook, side);

    if origin != (rank, KING_HOME_COL) || !unmoved(board, history, origin, king) {
        return;
    }
    if is_king_attacked(board, side, history) {
        return;
    }

    for castle in &CASTLE_SIDES {
        if !unmoved(board, history, (rank, castle.rook_col), rook) {
            continue;
        }
        if castle.between.iter().any(|&c| !board.is_empty((rank, c))) {
            continue;
        }
        let safe_path = castle.transit.iter().all(|&c| {
            let mut probe = *board;
            probe.set(origin, None);
            probe.set((rank, c), Some(king));
            !is_king_attacked(&probe, side, history)
        });
        if safe_path {
            targets.push((rank, castle.landing));
        }
    }
}
