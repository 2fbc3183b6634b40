pub mod board;
pub mod check;
pub mod engine;
pub mod error;
pub mod executor;
pub mod game;
pub mod history;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod status;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use error::{GameError, GameResult};
pub use game::{GameMode, GameState};
