//! The state of one game and the operations the presentation layer drives.
//!
//! Every mutating operation is atomic: on `Err` nothing changed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Square};
use crate::engine::{hints, pick_move, AiConfig, ScoredMove};
use crate::error::{GameError, GameResult};
use crate::executor::{execute, is_promotion, Effect};
use crate::history::History;
use crate::movegen::legal_moves;
use crate::moves::Move;
use crate::piece::{Color, PieceType};
use crate::status::{assess, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    TwoPlayer,
    VsComputer { computer: Color },
}

impl GameMode {
    /// Human plays White, the computer answers with Black.
    pub fn vs_computer() -> Self {
        GameMode::VsComputer { computer: Color::Black }
    }

    pub fn is_automated(self, side: Color) -> bool {
        matches!(self, GameMode::VsComputer { computer } if computer == side)
    }
}

/// A pawn that reached the last rank and is waiting for its replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Moved { effects: Vec<Effect> },
    AwaitingPromotion(PendingPromotion),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub board: Board,
    pub turn: Color,
    pub history: History,
    pub status: GameStatus,
    /// Whether the side to move is in check.
    pub in_check: bool,
    pub selected: Option<Square>,
    /// Legal destinations of `selected`.
    pub targets: Vec<Square>,
    pub pending_promotion: Option<PendingPromotion>,
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new(mode: GameMode) -> Self {
        Self::from_position(mode, Board::new(), Color::White)
    }

    /// Start from an arbitrary placement with an empty history.
    pub fn from_position(mode: GameMode, board: Board, turn: Color) -> Self {
        let mut state = GameState {
            mode,
            board,
            turn,
            history: History::new(),
            status: GameStatus::Ongoing,
            in_check: false,
            selected: None,
            targets: Vec::new(),
            pending_promotion: None,
        };
        state.reassess();
        state
    }

    /// Throw the current game away and start over in the same mode.
    pub fn restart(&mut self) {
        *self = Self::new(self.mode);
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_automated_turn(&self) -> bool {
        self.mode.is_automated(self.turn)
    }

    /// Legal destinations for the side to move's piece on `square`.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        legal_moves(&self.board, square, self.turn, &self.history)
    }

    /// Pieces of `color` no longer on the board.
    pub fn captured(&self, color: Color) -> Vec<(PieceType, u32)> {
        self.board.captured(color)
    }

    /// Select one of the side to move's pieces and return its destinations.
    pub fn select_square(&mut self, square: Square) -> GameResult<&[Square]> {
        self.ensure_accepting_moves()?;
        if self.board.color_at(square) != Some(self.turn) {
            debug!(?square, "selection rejected");
            return Err(GameError::NotSelectable { square });
        }
        self.targets = self.legal_moves(square);
        self.selected = Some(square);
        Ok(&self.targets)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.targets.clear();
    }

    /// Move the piece on `from` to `to`. A pawn reaching the last rank is not
    /// moved yet: the game waits for [`GameState::choose_promotion`].
    pub fn commit_move(&mut self, from: Square, to: Square) -> GameResult<MoveOutcome> {
        self.ensure_accepting_moves()?;
        if !self.legal_moves(from).contains(&to) {
            debug!(?from, ?to, "illegal move rejected");
            return Err(GameError::IllegalMove { from, to });
        }

        if is_promotion(&self.board, from, to) {
            let pending = PendingPromotion { from, to };
            self.pending_promotion = Some(pending);
            debug!(?from, ?to, "promotion pending");
            return Ok(MoveOutcome::AwaitingPromotion(pending));
        }

        let effects = self.finish_move(Move::new(from, to));
        Ok(MoveOutcome::Moved { effects })
    }

    /// Replace the waiting pawn with `piece_type` and hand the turn over.
    pub fn choose_promotion(&mut self, piece_type: PieceType) -> GameResult<MoveOutcome> {
        let pending = self.pending_promotion.ok_or(GameError::NoPromotionPending)?;
        if !piece_type.is_promotion_choice() {
            return Err(GameError::InvalidPromotion(piece_type));
        }
        let mv = Move { from: pending.from, to: pending.to, promotion: Some(piece_type) };
        let effects = self.finish_move(mv);
        Ok(MoveOutcome::Moved { effects })
    }

    /// Commit `mv` and, if it promotes, choose `mv.promotion` (a queen when
    /// unspecified) straight away.
    pub fn play_move(&mut self, mv: &Move) -> GameResult<Vec<Effect>> {
        match self.commit_move(mv.from, mv.to)? {
            MoveOutcome::Moved { effects } => Ok(effects),
            MoveOutcome::AwaitingPromotion(_) => {
                let piece_type = mv.promotion.unwrap_or(PieceType::Queen);
                match self.choose_promotion(piece_type) {
                    Ok(MoveOutcome::Moved { effects }) => Ok(effects),
                    Ok(MoveOutcome::AwaitingPromotion(_)) => Err(GameError::PromotionPending),
                    Err(e) => {
                        self.pending_promotion = None;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Take back the last move. While a promotion is pending this only
    /// cancels the promotion, since nothing was committed yet.
    pub fn undo(&mut self) -> GameResult<()> {
        if self.pending_promotion.take().is_some() {
            debug!("pending promotion cancelled");
            return Ok(());
        }
        let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.board = entry.board;
        self.turn = entry.turn;
        self.selected = entry.selected;
        self.targets = entry.moves;
        self.reassess();
        debug!(turn = %self.turn, plies = self.history.len(), "move undone");
        Ok(())
    }

    /// The `count` best moves for the side to move. Read-only.
    pub fn request_hint(&self, count: usize, config: &AiConfig) -> Vec<ScoredMove> {
        if self.is_over() || self.pending_promotion.is_some() {
            return Vec::new();
        }
        hints(&self.board, self.turn, &self.history, count, config)
    }

    /// Let the computer play its move.
    pub fn automated_move(&mut self, config: &AiConfig) -> GameResult<Move> {
        self.ensure_accepting_moves()?;
        if !self.is_automated_turn() {
            return Err(GameError::NotAutomatedTurn);
        }
        let mv = pick_move(&self.board, self.turn, &self.history, config).ok_or(GameError::NoLegalMoves)?;
        self.play_move(&mv)?;
        Ok(mv)
    }

    fn ensure_accepting_moves(&self) -> GameResult<()> {
        if self.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        if self.pending_promotion.is_some() {
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    fn finish_move(&mut self, mv: Move) -> Vec<Effect> {
        let offered = if self.selected == Some(mv.from) {
            std::mem::take(&mut self.targets)
        } else {
            self.legal_moves(mv.from)
        };
        let applied = execute(&self.board, self.turn, &mv, offered, &mut self.history);
        debug!(side = %self.turn, mv = %mv.to_uci(), "move committed");

        self.board = applied.board;
        self.turn = self.turn.opposite();
        self.pending_promotion = None;
        self.clear_selection();
        self.reassess();
        applied.effects
    }

    fn reassess(&mut self) {
        let assessment = assess(&self.board, self.turn, &self.history);
        self.status = assessment.status;
        self.in_check = assessment.in_check;
        if self.status.is_terminal() {
            info!(status = %self.status, plies = self.history.len(), "game over");
        }
    }
}
