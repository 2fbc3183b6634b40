//! Whole games driven through `GameState`, the way the browser front end
//! drives them.

use chess_rules::board::{Board, Square};
use chess_rules::check::is_king_attacked;
use chess_rules::engine::{pick_move, AiConfig};
use chess_rules::executor::{apply_move, Effect};
use chess_rules::game::{GameMode, GameState, MoveOutcome};
use chess_rules::moves::{parse_square, Move};
use chess_rules::movegen::legal_moves_for_side;
use chess_rules::piece::{Color, Piece, PieceType};
use chess_rules::status::GameStatus;
use chess_rules::GameError;

fn sq(name: &str) -> Square {
    parse_square(name).expect("valid square")
}

fn play(state: &mut GameState, ucis: &[&str]) {
    for uci in ucis {
        let mv = Move::from_uci(uci).expect("valid uci");
        state.play_move(&mv).unwrap_or_else(|e| panic!("{uci}: {e}"));
    }
}

#[test]
fn fools_mate() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    play(&mut state, &["f2f3", "e7e5", "g2g4"]);
    assert_eq!(state.status, GameStatus::Ongoing);

    play(&mut state, &["d8h4"]);
    assert_eq!(state.status, GameStatus::Checkmate { winner: Color::Black });
    assert_eq!(state.status.to_string(), "Checkmate by Black!");
}

#[test]
fn knight_shuffle_draws_on_third_occurrence() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut state, &shuffle);
    assert_eq!(state.status, GameStatus::Ongoing, "second occurrence only");
    play(&mut state, &shuffle[..3]);
    assert_eq!(state.status, GameStatus::Ongoing);
    play(&mut state, &shuffle[3..]);
    assert_eq!(state.status, GameStatus::DrawByRepetition);
    assert!(matches!(
        state.commit_move(sq("e2"), sq("e4")),
        Err(GameError::GameOver(GameStatus::DrawByRepetition))
    ));
}

#[test]
fn repetition_counts_placements_from_different_move_orders() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    play(&mut state, &["b1c3", "b8c6", "c3b1", "c6b8"]);
    assert_eq!(state.status, GameStatus::DrawByRepetition);
}

#[test]
fn castling_through_the_public_api() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    play(&mut state, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);

    let targets = state.select_square(sq("e1")).expect("own king").to_vec();
    assert!(targets.contains(&sq("g1")));

    let outcome = state.commit_move(sq("e1"), sq("g1")).expect("castle");
    let MoveOutcome::Moved { effects } = outcome else {
        panic!("castling is not a promotion");
    };
    assert_eq!(effects, vec![Effect::Castle { rook_from: sq("h1"), rook_to: sq("f1") }]);
    assert_eq!(state.board.get(sq("g1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(state.board.get(sq("f1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert!(state.board.is_empty(sq("h1")));

    state.undo().expect("undo castle");
    assert_eq!(state.board.get(sq("e1")), Some(Piece::new(PieceType::King, Color::White)));
    assert_eq!(state.board.get(sq("h1")), Some(Piece::new(PieceType::Rook, Color::White)));
    assert_eq!(state.turn, Color::White);
}

#[test]
fn en_passant_through_the_public_api() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    play(&mut state, &["e2e4", "a7a6", "e4e5", "f7f5"]);

    let outcome = state.commit_move(sq("e5"), sq("f6")).expect("en passant");
    let MoveOutcome::Moved { effects } = outcome else {
        panic!("not a promotion");
    };
    assert!(effects.contains(&Effect::EnPassant { captured: sq("f5") }));
    assert!(state.board.is_empty(sq("f5")));
    assert_eq!(state.captured(Color::Black), vec![(PieceType::Pawn, 1)]);
}

#[test]
fn undo_after_each_move_restores_the_position() {
    let mut state = GameState::new(GameMode::TwoPlayer);
    for uci in ["d2d4", "d7d5", "c2c4", "d5c4", "e2e3"] {
        let before = (state.board, state.turn);
        let mv = Move::from_uci(uci).expect("valid uci");
        state.play_move(&mv).expect("legal");
        state.undo().expect("undo");
        assert_eq!((state.board, state.turn), before, "undo of {uci}");
        state.play_move(&mv).expect("legal again");
    }
}

/// Self-play with the heuristic, checking after every ply that no legal
/// move leaves the mover's own king attacked.
#[test]
fn legal_moves_never_leave_own_king_attacked() {
    let config = AiConfig::new();
    for _ in 0..3 {
        let mut state = GameState::new(GameMode::TwoPlayer);
        for _ in 0..60 {
            if state.is_over() {
                break;
            }
            let side = state.turn;
            for mv in legal_moves_for_side(&state.board, side, &state.history) {
                let after = apply_move(&state.board, &mv).board;
                assert!(
                    !is_king_attacked(&after, side, &state.history),
                    "{} leaves {side} in check",
                    mv.to_uci()
                );
            }
            let mv = pick_move(&state.board, side, &state.history, &config).expect("not over");
            state.play_move(&mv).expect("picked move is legal");
        }
    }
}

#[test]
fn computer_game_alternates_turns() {
    let mut state = GameState::new(GameMode::vs_computer());
    let config = AiConfig::new();
    play(&mut state, &["e2e4"]);
    assert!(state.is_automated_turn());
    state.automated_move(&config).expect("computer moves");
    assert!(!state.is_automated_turn());
    assert_eq!(state.history.len(), 2);
}

#[test]
fn board_without_king_is_lost_for_that_side() {
    let board = Board::empty()
        .with(sq("e8"), PieceType::King, Color::Black)
        .with(sq("a2"), PieceType::Pawn, Color::White);
    let state = GameState::from_position(GameMode::TwoPlayer, board, Color::White);
    assert!(state.in_check);
    assert_eq!(state.status, GameStatus::Checkmate { winner: Color::Black });
}
