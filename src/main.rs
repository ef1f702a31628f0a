//! Gomoku-Rust: a five-in-a-row engine.
//!
//! ## Usage
//!
//! - `gomoku-rust` - Watch the engine play itself
//! - `gomoku-rust protocol` - Start the text protocol on stdin/stdout
//! - `gomoku-rust demo --rounds 40` - Self-play for a number of rounds

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gomoku_rust::board::Color;
use gomoku_rust::config::EngineConfig;
use gomoku_rust::game::{GameEvent, Match};
use gomoku_rust::protocol::TextEngine;
use gomoku_rust::search::Engine;

/// Gomoku-Rust: alpha-beta five-in-a-row engine
#[derive(Parser)]
#[command(name = "gomoku-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Time budget per move in milliseconds
    #[arg(long, global = true, default_value_t = gomoku_rust::constants::MOVE_TIME_MS)]
    move_time: u64,

    /// Deepest iterative-deepening pass
    #[arg(long, global = true, default_value_t = gomoku_rust::constants::MAX_DEPTH)]
    max_depth: usize,

    /// Transposition cache slots
    #[arg(long, global = true, default_value_t = gomoku_rust::constants::TRANS_SIZE)]
    cache_size: usize,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server for use with front ends
    Protocol,
    /// Let the engine play against itself
    Demo {
        /// Number of self-play rounds (one black and one white move each)
        #[arg(long, default_value_t = 30)]
        rounds: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(cli.log_level.as_str());
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();

    let mut config = EngineConfig {
        cache_capacity: cli.cache_size,
        ..EngineConfig::default()
    }
    .with_move_time(Duration::from_millis(cli.move_time))
    .with_max_depth(cli.max_depth);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let engine = Engine::new(config);

    match cli.command {
        Some(Commands::Protocol) => TextEngine::new(engine).run()?,
        Some(Commands::Demo { rounds }) => run_demo(engine, rounds)?,
        None => run_demo(engine, 30)?,
    }
    Ok(())
}

fn run_demo(engine: Engine, rounds: usize) -> Result<()> {
    println!("Gomoku-Rust: engine self-play\n");

    let mut session = Match::new(engine);
    for _ in 0..rounds {
        for event in session.demo_round()? {
            match event {
                GameEvent::Placed { color, point } => {
                    println!("{color} plays {},{}", point.0, point.1)
                }
                GameEvent::Victory { color, victory } => {
                    println!(
                        "{color} wins: five from {},{} (direction {})",
                        victory.anchor.0,
                        victory.anchor.1,
                        victory.direction.code()
                    );
                }
                GameEvent::Draw => println!("draw"),
                GameEvent::NewGame { game } => println!("\n=== game {} ===", game + 1),
            }
        }
    }

    println!("\n{}", session.engine().board());
    println!(
        "Score: black {} white {}",
        session.score(Color::Black),
        session.score(Color::White)
    );
    Ok(())
}
