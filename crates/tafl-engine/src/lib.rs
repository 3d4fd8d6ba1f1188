//! Rules engine for 11x11 Tafl games.
//!
//! This crate provides:
//! - [`Geometry`] - per-width direction offsets and distances to the edge
//! - [`Board`] - a row-major mailbox of typed cells
//! - [`MoveGenerator`] - lazy destination enumeration for every piece type
//! - Custodian captures and shield walls in [`capture`]
//! - The encirclement and exit-fort checks in [`encircle`]
//! - [`Position`], the [`RuleSet`] trait and the [`Copenhagen`] rules
//! - [`Game`] - complete game management with history tracking
//!
//! # Example
//!
//! ```
//! use tafl_engine::{Copenhagen, Game, RuleSet};
//!
//! let rules = Copenhagen::default();
//! let position = rules.initial_position();
//! println!("Attacker moves from the start: {}", rules.generate_moves(&position).len());
//!
//! let mut game = Game::new();
//! game.make_move_notation("d11-d9").unwrap();
//! println!("Position after d11-d9: {}", game.to_fen());
//! ```

mod board;
pub mod capture;
pub mod encircle;
mod game;
mod geometry;
mod movegen;
mod position;
pub mod rules;

pub use board::Board;
pub use capture::{find_captures, is_king_captured, resolve_captures, CaptureRules};
pub use encircle::{all_defenders_surrounded, is_exit_fort, EncirclementDetector, FillMode};
pub use game::{Game, GameError, GameMove};
pub use geometry::{Geometry, Jump, Offset, MAX_WIDTH, MIN_WIDTH, STANDARD_WIDTH};
pub use movegen::{Destinations, MoveGenerator, MoveList};
pub use position::Position;
pub use rules::{Copenhagen, GameResult, RuleOptions, RuleSet, WinCondition};
