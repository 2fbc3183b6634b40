use std::io::Write;

use chess_rules::engine::{pick_move, AiConfig, Weights};
use chess_rules::game::{GameMode, GameState};
use chess_rules::piece::Color;
use chess_rules::status::GameStatus;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Pit AiConfig variations against the default config.
#[derive(Parser)]
struct Args {
    /// Games per matchup, split evenly between colours.
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Plies before a game is scored as a draw.
    #[arg(long, default_value_t = 150)]
    max_plies: usize,
}

#[derive(Debug, Default)]
struct MatchResult {
    a_wins: u32,
    b_wins: u32,
    draws: u32,
}

fn play_game(white: &AiConfig, black: &AiConfig, max_plies: usize) -> Option<Color> {
    let mut state = GameState::new(GameMode::TwoPlayer);
    for _ in 0..max_plies {
        if state.is_over() {
            break;
        }
        let config = if state.turn == Color::White { white } else { black };
        let Some(mv) = pick_move(&state.board, state.turn, &state.history, config) else {
            break;
        };
        if state.play_move(&mv).is_err() {
            break;
        }
    }
    debug!(status = %state.status, plies = state.history.len(), "simulated game");

    match state.status {
        GameStatus::Checkmate { winner } => Some(winner),
        _ => None, // draw or hit move limit
    }
}

fn run_matchup(label_a: &str, config_a: &AiConfig, config_b: &AiConfig, args: &Args) -> MatchResult {
    let mut result = MatchResult::default();
    let half = args.games / 2;

    for a_color in [Color::White, Color::Black] {
        for _ in 0..half {
            let winner = match a_color {
                Color::White => play_game(config_a, config_b, args.max_plies),
                Color::Black => play_game(config_b, config_a, args.max_plies),
            };
            match winner {
                Some(c) if c == a_color => result.a_wins += 1,
                Some(_) => result.b_wins += 1,
                None => result.draws += 1,
            }
        }
    }

    println!(
        "  {label_a} vs baseline: {label_a} wins {}, baseline wins {}, draws {} (out of {})",
        result.a_wins,
        result.b_wins,
        result.draws,
        half * 2
    );
    std::io::stdout().flush().ok();
    result
}

fn make_config(f: impl FnOnce(&mut AiConfig)) -> AiConfig {
    let mut config = AiConfig::new();
    f(&mut config);
    config
}

fn make_weights(f: impl FnOnce(&mut Weights)) -> AiConfig {
    make_config(|c| f(&mut c.weights))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("=== Move scoring weight comparison ===");
    println!("Games per matchup: {}, max plies per game: {}\n", args.games, args.max_plies);

    let baseline = AiConfig::new();
    let variations: Vec<(&str, AiConfig)> = vec![
        ("chk_bonus=0.0", make_weights(|w| w.check_bonus = 0.0)),
        ("chk_bonus=0.9", make_weights(|w| w.check_bonus = 0.9)),
        ("chk_bonus=2.5", make_weights(|w| w.check_bonus = 2.5)),
        ("top_n=1", make_config(|c| c.top_n = 1)),
        ("top_n=6", make_config(|c| c.top_n = 6)),
        ("tie_window=1.0", make_config(|c| c.tie_window = 1.0)),
    ];

    let mut scores: Vec<(&str, i32)> = variations
        .iter()
        .map(|(label, config)| {
            let r = run_matchup(label, config, &baseline, &args);
            (*label, r.a_wins as i32 - r.b_wins as i32)
        })
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    println!("\n--- Rankings (net wins vs baseline) ---\n");
    for (label, net) in &scores {
        let indicator = if *net > 0 { "+" } else { "" };
        println!("  {label:<16} {indicator}{net}");
    }
}
