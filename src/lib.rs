//! Gomoku-Rust: a five-in-a-row engine.
//!
//! This crate picks moves for five-in-a-row on a 20x20 board using a
//! time-bounded minimax search with alpha-beta pruning, iterative deepening,
//! a zobrist-keyed transposition cache and a pattern-based evaluator.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`config`] - Runtime engine configuration
//! - [`board`] - Padded board with permanent/transient stones
//! - [`zobrist`] - Incremental position fingerprints
//! - [`position`] - Board plus fingerprint, with scoped transient moves
//! - [`cache`] - Direct-mapped transposition cache
//! - [`patterns`] - Weighted line patterns
//! - [`eval`] - Static evaluation
//! - [`rules`] - Admissible moves, five-in-a-row and draw detection
//! - [`search`] - The engine and its alpha-beta search
//! - [`game`] - Match flow for front ends
//! - [`protocol`] - Text protocol on stdin/stdout
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use gomoku_rust::board::Color;
//! use gomoku_rust::config::EngineConfig;
//! use gomoku_rust::search::Engine;
//!
//! let config = EngineConfig::default().with_move_time(Duration::from_millis(100));
//! let mut engine = Engine::new(config);
//!
//! // The first stone is placed directly; the engine only answers.
//! engine.place_stone(Color::White, 10, 10).unwrap();
//! let (x, y) = engine.get_best_move(Color::Black).unwrap();
//! engine.place_stone(Color::Black, x, y).unwrap();
//! assert!(engine.is_victory(Color::Black).is_none());
//! ```

pub mod board;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod eval;
pub mod game;
pub mod patterns;
pub mod position;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod zobrist;

pub use board::{Board, Color, Point};
pub use error::EngineError;
pub use search::{CancelToken, Engine, SearchReport};
