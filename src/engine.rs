// =============================================================================
// Move Evaluator
//
// Single-ply heuristic: every legal move is simulated once and scored by what
// it achieves immediately (mate, check, material won, promotion). There is no
// search below the first ply. A small random jitter breaks ties so equal moves
// are not always played in the same order, and the final pick is random among
// the top few moves whose scores are within `tie_window` of the best.
//
// Coordinate system: row 0 = rank 1, col 0 = file a.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::check::is_king_attacked;
use crate::executor::{apply_move, is_promotion};
use crate::history::{History, HistoryEntry};
use crate::movegen::{has_any_legal_move, legal_moves_for_side};
use crate::moves::Move;
use crate::piece::{Color, PieceType};

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
pub fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Tunable weights for move scoring.
/// Adjusted with the AI-vs-AI matchups in src/bin/simulate.rs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Score of a move that checkmates. Must dominate every other sum.
    pub mate: f64,
    /// Bonus for leaving the opponent in check.
    pub check_bonus: f64,
    /// Upper bound of the random tie-break added to every score.
    /// Keep it below the smallest real difference between scores.
    pub jitter: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            mate: 10_000.0,
            check_bonus: 0.5,
            jitter: 0.01,
        }
    }
}

/// Controls how the automated side picks among scored moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Size of the cluster of best moves the automated side picks from.
    pub top_n: usize,
    /// Moves scoring within this distance of the best one are considered tied.
    pub tie_window: f64,
    pub weights: Weights,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AiConfig {
    pub fn new() -> Self {
        AiConfig {
            top_n: 3,
            tie_window: 0.05,
            weights: Weights::default(),
        }
    }
}

/// A move paired with its heuristic score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Standard piece values in pawns. The king has no material value since
/// it is never captured.
pub fn piece_value(pt: PieceType) -> f64 {
    match pt {
        PieceType::Pawn => 1.0,
        PieceType::Knight => 3.0,
        PieceType::Bishop => 3.0,
        PieceType::Rook => 5.0,
        PieceType::Queen => 9.0,
        PieceType::King => 0.0,
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Score `mv` for `side` without the random jitter.
///
/// A pawn reaching the last rank is simulated as the piece named in
/// `mv.promotion`, or a queen if none is named, so promotions that check or
/// mate are scored as such.
pub fn base_score(board: &Board, mv: &Move, side: Color, history: &History, weights: &Weights) -> f64 {
    let mut sim = *mv;
    let promoting = is_promotion(board, mv.from, mv.to);
    if promoting && sim.promotion.is_none() {
        sim.promotion = Some(PieceType::Queen);
    }

    let applied = apply_move(board, &sim);
    let after_history = history.extended(HistoryEntry {
        board: *board,
        turn: side,
        selected: Some(mv.from),
        moves: Vec::new(),
    });

    let opponent = side.opposite();
    let gives_check = is_king_attacked(&applied.board, opponent, &after_history);
    if gives_check && !has_any_legal_move(&applied.board, opponent, &after_history) {
        return weights.mate;
    }

    let mut score = 0.0;
    if gives_check {
        score += weights.check_bonus;
    }
    if let Some(victim) = applied.captured() {
        score += piece_value(victim.piece_type);
    }
    if promoting {
        score += piece_value(PieceType::Queen);
    }
    score
}

/// Score `mv` for `side`, including the random tie-break.
pub fn score_move(board: &Board, mv: &Move, side: Color, history: &History, config: &AiConfig) -> f64 {
    let w = &config.weights;
    let score = base_score(board, mv, side, history, w) + w.jitter * random_f64();
    trace!(mv = %mv.to_uci(), score, "scored move");
    score
}

/// Every legal move for `side`, best first. Promotions are listed as queen
/// promotions.
pub fn rank_moves(board: &Board, side: Color, history: &History, config: &AiConfig) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = legal_moves_for_side(board, side, history)
        .into_iter()
        .map(|mut mv| {
            if is_promotion(board, mv.from, mv.to) {
                mv.promotion = Some(PieceType::Queen);
            }
            let score = score_move(board, &mv, side, history, config);
            ScoredMove { mv, score }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

// =============================================================================
// Move selection
// =============================================================================

/// Pick a move for the automated side.
///
/// 1. Score and rank all legal moves
/// 2. Keep the top `top_n` moves scoring within `tie_window` of the best
/// 3. Randomly pick among them (adds variety to play)
pub fn pick_move(board: &Board, side: Color, history: &History, config: &AiConfig) -> Option<Move> {
    let ranked = rank_moves(board, side, history, config);
    let best = ranked.first()?.score;
    let window = config.tie_window.max(0.0);

    let top: Vec<&ScoredMove> = ranked
        .iter()
        .take(config.top_n.max(1))
        .filter(|s| best - s.score <= window)
        .collect();

    let index = (random_f64() * top.len() as f64) as usize;
    Some(top[index.min(top.len() - 1)].mv)
}

/// The `count` best moves for `side`, for display as hints.
pub fn hints(board: &Board, side: Color, history: &History, count: usize, config: &AiConfig) -> Vec<ScoredMove> {
    let mut ranked = rank_moves(board, side, history, config);
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{assess, GameStatus};

    fn exact() -> AiConfig {
        let mut config = AiConfig::new();
        config.weights.jitter = 0.0;
        config
    }

    fn mv(s: &str) -> Move {
        Move::from_uci(s).expect("valid uci")
    }

    /// White Kg6, Qa7 against Kh8: several queen moves mate.
    fn mate_in_one() -> Board {
        Board::empty()
            .with((5, 6), PieceType::King, Color::White)
            .with((6, 0), PieceType::Queen, Color::White)
            .with((7, 7), PieceType::King, Color::Black)
    }

    /// White rook on d4 can take a queen on d7 or a pawn on h4.
    fn capture_choice() -> Board {
        Board::empty()
            .with((0, 0), PieceType::King, Color::White)
            .with((3, 3), PieceType::Rook, Color::White)
            .with((6, 3), PieceType::Queen, Color::Black)
            .with((3, 7), PieceType::Pawn, Color::Black)
            .with((7, 7), PieceType::King, Color::Black)
    }

    #[test]
    fn mate_dominates_everything() {
        let board = mate_in_one();
        let history = History::new();
        let config = exact();
        assert_eq!(base_score(&board, &mv("a7g7"), Color::White, &history, &config.weights), 10_000.0);

        let chosen = pick_move(&board, Color::White, &history, &config).expect("has moves");
        let after = apply_move(&board, &chosen).board;
        let a = assess(&after, Color::Black, &history);
        assert_eq!(a.status, GameStatus::Checkmate { winner: Color::White }, "picked {}", chosen.to_uci());
    }

    #[test]
    fn captured_material_is_scored() {
        let board = capture_choice();
        let history = History::new();
        let w = exact().weights;
        assert_eq!(base_score(&board, &mv("d4d7"), Color::White, &history, &w), 9.0);
        // Rxh4 also checks along the h-file.
        assert_eq!(base_score(&board, &mv("d4h4"), Color::White, &history, &w), 1.5);
        assert_eq!(base_score(&board, &mv("d4d5"), Color::White, &history, &w), 0.0);

        let chosen = pick_move(&board, Color::White, &history, &AiConfig::new()).expect("has moves");
        assert_eq!(chosen, mv("d4d7"));
    }

    #[test]
    fn promotion_bonus_is_a_queen() {
        let board = Board::empty()
            .with((0, 4), PieceType::King, Color::White)
            .with((6, 0), PieceType::Pawn, Color::White)
            .with((4, 7), PieceType::King, Color::Black);
        let history = History::new();
        let w = exact().weights;
        assert_eq!(base_score(&board, &mv("a7a8"), Color::White, &history, &w), 9.0);

        let chosen = pick_move(&board, Color::White, &history, &exact()).expect("has moves");
        assert_eq!(chosen, mv("a7a8q"));
    }

    #[test]
    fn check_bonus_applies() {
        let board = Board::empty()
            .with((0, 0), PieceType::King, Color::White)
            .with((3, 0), PieceType::Rook, Color::White)
            .with((7, 4), PieceType::King, Color::Black);
        let history = History::new();
        let w = exact().weights;
        // Ra4-e4 checks down the e-file, Ra4-b4 does not.
        assert_eq!(base_score(&board, &mv("a4e4"), Color::White, &history, &w), 0.5);
        assert_eq!(base_score(&board, &mv("a4b4"), Color::White, &history, &w), 0.0);
    }

    #[test]
    fn hints_are_sorted_and_truncated() {
        let board = capture_choice();
        let hints = hints(&board, Color::White, &History::new(), 3, &AiConfig::new());
        assert_eq!(hints.len(), 3);
        assert_eq!(hints[0].mv, mv("d4d7"));
        assert!(hints.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn jitter_stays_below_real_differences() {
        let board = capture_choice();
        let config = AiConfig::new();
        for _ in 0..20 {
            let s = score_move(&board, &mv("d4d5"), Color::White, &History::new(), &config);
            assert!((0.0..config.weights.jitter).contains(&s));
        }
    }

    #[test]
    fn no_moves_means_no_pick() {
        let board = Board::empty()
            .with((0, 0), PieceType::King, Color::White)
            .with((2, 1), PieceType::Queen, Color::Black)
            .with((1, 2), PieceType::King, Color::Black);
        assert_eq!(pick_move(&board, Color::White, &History::new(), &AiConfig::new()), None);
    }
}
