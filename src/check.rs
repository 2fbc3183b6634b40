use tracing::warn;

use crate::board::{Board, Square};
use crate::history::History;
use crate::movegen::generate;
use crate::piece::Color;

/// True if `side`'s king is attacked. A board without that king counts as
/// attacked.
///
/// Attack scans call the generator with `skip_self_check` so this never
/// recurses back into legality filtering.
pub fn is_king_attacked(board: &Board, side: Color, history: &History) -> bool {
    let Some(king) = board.find_king(side) else {
        warn!(%side, "no king on the board, treating it as attacked");
        return true;
    };
    is_attacked_by(board, king, side.opposite(), history)
}

/// True if some piece of `attacker` can move onto `target`.
///
/// Pawns only reach a diagonal square that holds an enemy piece, so this is
/// meant for occupied targets such as a king's square.
pub fn is_attacked_by(board: &Board, target: Square, attacker: Color, history: &History) -> bool {
    board
        .pieces(attacker)
        .any(|(from, _)| generate(board, from, attacker, history, true).contains(&target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;

    #[test]
    fn missing_king_counts_as_attacked() {
        let board = Board::empty().with((7, 4), PieceType::King, Color::Black);
        assert!(is_king_attacked(&board, Color::White, &History::new()));
        assert!(!is_king_attacked(&board, Color::Black, &History::new()));
    }

    #[test]
    fn each_piece_kind_gives_check() {
        let history = History::new();
        let base = Board::empty()
            .with((3, 3), PieceType::King, Color::White)
            .with((7, 7), PieceType::King, Color::Black);

        let attackers = [
            ((4, 4), PieceType::Pawn),
            ((5, 4), PieceType::Knight),
            ((6, 0), PieceType::Bishop),
            ((3, 6), PieceType::Rook),
            ((0, 3), PieceType::Queen),
        ];
        for (sq, pt) in attackers {
            let board = base.with(sq, pt, Color::Black);
            assert!(is_king_attacked(&board, Color::White, &history), "{pt} should check");
        }
    }

    #[test]
    fn pawns_do_not_attack_straight_ahead() {
        let board = Board::empty()
            .with((3, 3), PieceType::King, Color::White)
            .with((4, 3), PieceType::Pawn, Color::Black)
            .with((7, 7), PieceType::King, Color::Black);
        assert!(!is_king_attacked(&board, Color::White, &History::new()));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let board = Board::empty()
            .with((0, 4), PieceType::King, Color::White)
            .with((1, 4), PieceType::Pawn, Color::White)
            .with((6, 4), PieceType::Rook, Color::Black)
            .with((7, 7), PieceType::King, Color::Black);
        assert!(!is_king_attacked(&board, Color::White, &History::new()));
        assert!(is_attacked_by(&board, (1, 4), Color::Black, &History::new()));
    }
}
