use std::path::PathBuf;

use chess_rules::engine::{pick_move, AiConfig};
use chess_rules::game::{GameMode, GameState};
use chess_rules::status::GameStatus;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Computer-vs-computer games with the single-ply heuristic.
#[derive(Parser)]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Stop a game after this many plies and call it unfinished.
    #[arg(long, default_value_t = 300)]
    max_plies: usize,
    /// JSON file with an AiConfig; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct GameSummary {
    game: usize,
    plies: usize,
    result: String,
    moves: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<AiConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(serde_json::from_str(&std::fs::read_to_string(p)?)?),
        None => Ok(AiConfig::new()),
    }
}

fn play_game(config: &AiConfig, max_plies: usize) -> (GameState, Vec<String>) {
    let mut state = GameState::new(GameMode::TwoPlayer);
    let mut moves = Vec::new();

    while !state.is_over() && moves.len() < max_plies {
        let Some(mv) = pick_move(&state.board, state.turn, &state.history, config) else {
            break;
        };
        if let Err(e) = state.play_move(&mv) {
            warn!(mv = %mv.to_uci(), error = %e, "engine picked a rejected move");
            break;
        }
        moves.push(mv.to_uci());
    }
    (state, moves)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    info!(?config, games = args.games, "starting self-play");

    for game in 1..=args.games {
        let (state, moves) = play_game(&config, args.max_plies);
        let result = match state.status {
            GameStatus::Ongoing => "unfinished".to_string(),
            status => status.to_string(),
        };
        info!(game, plies = moves.len(), %result, "game finished");

        let summary = GameSummary { game, plies: moves.len(), result, moves };
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
