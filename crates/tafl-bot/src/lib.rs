//! Alpha-beta Tafl bot.
//!
//! This crate provides:
//! - [`best_move`] - the flat-board boundary: raw cells in, `[from, to]` out
//! - [`search`] - fixed-depth negamax with move ordering
//! - [`eval`] - the static evaluation and its weights
//! - [`BotConfig`] - TOML configuration of depth, weights and rules
//!
//! # Example
//!
//! ```
//! use tafl_bot::{best_move, BotConfig};
//! use tafl_engine::Position;
//!
//! let board = Position::startpos().board().to_raw();
//! let config = BotConfig::default().with_depth(1);
//! let [from, to] = best_move(&board, 16, 60, &config).unwrap();
//! assert_ne!(from, to);
//! ```

pub mod boundary;
pub mod config;
pub mod eval;
pub mod search;

pub use boundary::{best_move, decode_position, search_position, BoundaryError};
pub use config::{BotConfig, ConfigError};
pub use eval::{EvalWeights, Evaluator};
pub use search::{SearchResult, Searcher};
