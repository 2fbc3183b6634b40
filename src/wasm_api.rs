use crate::board::Square;
use crate::engine::AiConfig;
use crate::error::GameError;
use crate::game::{GameMode, GameState, MoveOutcome};
use crate::piece::{Color, PieceType};
use crate::status::GameStatus;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    piece_type: &'static str,
    color: String,
}

#[derive(Serialize)]
struct MoveJson {
    from: [usize; 2],
    to: [usize; 2],
    promotion: Option<&'static str>,
    score: f64,
}

#[derive(Serialize)]
struct CapturedJson {
    piece_type: &'static str,
    count: u32,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    game_over: bool,
    result: Option<String>,
    is_in_check: bool,
    selected: Option<[usize; 2]>,
    targets: Vec<[usize; 2]>,
    pending_promotion: Option<[[usize; 2]; 2]>,
    computer_to_move: bool,
    can_undo: bool,
    /// Pieces White has lost, shown as "Out by Black".
    captured_white: Vec<CapturedJson>,
    captured_black: Vec<CapturedJson>,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: BoardState,
    error: Option<String>,
}

fn sq(s: Square) -> [usize; 2] {
    [s.0, s.1]
}

fn captured_json(state: &GameState, color: Color) -> Vec<CapturedJson> {
    state
        .captured(color)
        .into_iter()
        .map(|(pt, count)| CapturedJson { piece_type: pt.name(), count })
        .collect()
}

fn build_board_state(state: &GameState) -> BoardState {
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| {
                    state.board.squares[r][c].map(|p| SquarePiece {
                        piece_type: p.piece_type.name(),
                        color: p.color.to_string(),
                    })
                })
                .collect()
        })
        .collect();

    let result = match state.status {
        GameStatus::Ongoing => None,
        status => Some(status.to_string()),
    };

    BoardState {
        squares,
        current_turn: state.turn.to_string(),
        game_over: state.is_over(),
        result,
        is_in_check: state.in_check,
        selected: state.selected.map(sq),
        targets: state.targets.iter().copied().map(sq).collect(),
        pending_promotion: state.pending_promotion.map(|p| [sq(p.from), sq(p.to)]),
        computer_to_move: state.is_automated_turn() && !state.is_over(),
        can_undo: !state.history.is_empty() || state.pending_promotion.is_some(),
        captured_white: captured_json(state, Color::White),
        captured_black: captured_json(state, Color::Black),
    }
}

fn mode_for(vs_computer: bool) -> GameMode {
    if vs_computer {
        GameMode::vs_computer()
    } else {
        GameMode::TwoPlayer
    }
}

#[wasm_bindgen]
pub struct Game {
    state: GameState,
    ai_config: AiConfig,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(vs_computer: bool) -> Game {
        Game {
            state: GameState::new(mode_for(vs_computer)),
            ai_config: AiConfig::new(),
        }
    }

    pub fn new_game(&mut self, vs_computer: bool) -> JsValue {
        self.state = GameState::new(mode_for(vs_computer));
        self.respond(Ok(()))
    }

    pub fn restart(&mut self) -> JsValue {
        self.state.restart();
        self.respond(Ok(()))
    }

    pub fn set_top_n(&mut self, top_n: usize) {
        self.ai_config.top_n = top_n.clamp(1, 10);
    }

    pub fn set_check_bonus(&mut self, bonus: f64) {
        self.ai_config.weights.check_bonus = bonus.max(0.0);
    }

    pub fn build_timestamp(&self) -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.state);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    pub fn select_square(&mut self, row: usize, col: usize) -> JsValue {
        if row >= 8 || col >= 8 {
            return self.respond(Err(GameError::NotSelectable { square: (row, col) }));
        }
        let result = self.state.select_square((row, col)).map(|_| ());
        if result.is_err() {
            self.state.clear_selection();
        }
        self.respond(result)
    }

    pub fn make_move(&mut self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> JsValue {
        if from_row >= 8 || from_col >= 8 || to_row >= 8 || to_col >= 8 {
            let err = GameError::IllegalMove { from: (from_row, from_col), to: (to_row, to_col) };
            return self.respond(Err(err));
        }
        let result = self
            .state
            .commit_move((from_row, from_col), (to_row, to_col))
            .map(|_: MoveOutcome| ());
        self.respond(result)
    }

    pub fn choose_promotion(&mut self, piece: &str) -> JsValue {
        let result = match PieceType::from_name(piece) {
            Some(pt) => self.state.choose_promotion(pt).map(|_| ()),
            None => Err(GameError::InvalidPromotion(PieceType::Pawn)),
        };
        self.respond(result)
    }

    pub fn undo(&mut self) -> JsValue {
        let result = self.state.undo();
        self.respond(result)
    }

    pub fn make_ai_move(&mut self) -> JsValue {
        let result = self.state.automated_move(&self.ai_config).map(|_| ());
        self.respond(result)
    }

    pub fn get_hints(&self, count: usize) -> JsValue {
        let hints: Vec<MoveJson> = self
            .state
            .request_hint(count, &self.ai_config)
            .into_iter()
            .map(|s| MoveJson {
                from: sq(s.mv.from),
                to: sq(s.mv.to),
                promotion: s.mv.promotion.map(PieceType::name),
                score: s.score,
            })
            .collect();
        serde_wasm_bindgen::to_value(&hints).unwrap_or(JsValue::NULL)
    }
}

impl Game {
    fn respond(&self, result: Result<(), GameError>) -> JsValue {
        let reply = MoveResult {
            board_state: build_board_state(&self.state),
            error: result.err().map(|e| e.to_string()),
        };
        serde_wasm_bindgen::to_value(&reply).unwrap_or(JsValue::NULL)
    }
}
