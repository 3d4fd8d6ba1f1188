//! Rule set abstraction for Tafl variants.
//!
//! The engine is rule-agnostic: move legality, move application and terminal
//! detection are delegated to the active [`RuleSet`].

mod copenhagen;

pub use copenhagen::Copenhagen;

use crate::{CaptureRules, MoveGenerator, MoveList, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use tafl_core::{Color, Move, TaflError};

/// Variant refinements. Every field has a default, so a partial TOML or JSON
/// table is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// The king slides like a soldier instead of stepping one cell.
    pub king_slides: bool,
    /// Empty corners flank every piece.
    pub hostile_corners: bool,
    /// The empty throne flanks every piece; an occupied one flanks attackers.
    pub hostile_throne: bool,
    /// Edge lines pinned from the inside are captured together.
    pub shield_wall: bool,
    /// Soldiers may slide across the empty throne.
    pub pass_through_throne: bool,
    /// A king on the edge walled in by uncapturable defenders wins.
    pub exit_fort: bool,
    /// Repeating a position `repetition_limit` times loses for the defenders.
    pub repetition_loses_for_defenders: bool,
    pub repetition_limit: u32,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            king_slides: true,
            hostile_corners: true,
            hostile_throne: true,
            shield_wall: true,
            pass_through_throne: false,
            exit_fort: true,
            repetition_loses_for_defenders: true,
            repetition_limit: 3,
        }
    }
}

impl RuleOptions {
    pub fn capture_rules(&self) -> CaptureRules {
        CaptureRules {
            hostile_corners: self.hostile_corners,
            hostile_throne: self.hostile_throne,
            shield_wall: self.shield_wall,
        }
    }

    pub fn move_generator(&self) -> MoveGenerator {
        MoveGenerator::tafl(self.king_slides).with_throne_passage(self.pass_through_throne)
    }
}

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinCondition {
    /// The king reached a corner.
    Escape,
    /// The king was enclosed on four sides.
    KingCaptured,
    /// No defender can reach the edge.
    Surrounded,
    /// The king sits on the edge inside a fort the attackers cannot break.
    ExitFort,
    /// The side to move had no legal move.
    NoLegalMoves,
    /// A position repeated too often.
    Repetition,
    Resignation,
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WinCondition::Escape => "king escaped",
            WinCondition::KingCaptured => "king captured",
            WinCondition::Surrounded => "defenders surrounded",
            WinCondition::ExitFort => "exit fort",
            WinCondition::NoLegalMoves => "no legal moves",
            WinCondition::Repetition => "repetition",
            WinCondition::Resignation => "resignation",
        };
        f.write_str(text)
    }
}

/// Result of a finished game. Tafl has no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub condition: WinCondition,
}

impl GameResult {
    pub const fn new(winner: Color, condition: WinCondition) -> Self {
        GameResult { winner, condition }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.winner.is_defender() {
            "defenders"
        } else {
            "attackers"
        };
        write!(f, "{} win by {}", side, self.condition)
    }
}

/// Trait for implementing Tafl variants.
///
/// # Example
///
/// ```
/// use tafl_engine::rules::{Copenhagen, RuleSet};
///
/// let rules = Copenhagen::default();
/// let position = rules.initial_position();
/// let moves = rules.generate_moves(&position);
/// assert!(!moves.is_empty());
/// ```
pub trait RuleSet {
    /// Returns the initial position for this variant.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Like [`generate_moves`](RuleSet::generate_moves), but an empty move
    /// set is reported as [`TaflError::NoLegalMoves`].
    fn legal_moves(&self, position: &Position) -> Result<MoveList, TaflError> {
        let moves = self.generate_moves(position);
        if moves.is_empty() {
            Err(TaflError::NoLegalMoves(position.side_to_move))
        } else {
            Ok(moves)
        }
    }

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool {
        self.generate_moves(position).contains(m)
    }

    /// Plays `m` in place, resolves captures and passes the turn. Returns the
    /// captured cells.
    ///
    /// The move is not validated; see [`is_legal`](RuleSet::is_legal).
    fn apply_move(&self, position: &mut Position, m: Move) -> Vec<usize>;

    /// Makes a move on a copy of the position.
    fn make_move(&self, position: &Position, m: Move) -> Position {
        let mut next = position.clone();
        self.apply_move(&mut next, m);
        next
    }

    /// Attempts to make a move, returning `None` if illegal.
    fn try_make_move(&self, position: &Position, m: Move) -> Option<Position> {
        if self.is_legal(position, m) {
            Some(self.make_move(position, m))
        } else {
            None
        }
    }

    /// Returns the game result if the game is over, otherwise `None`.
    ///
    /// Only conditions visible in a single position are checked. Repetition
    /// needs the history kept by [`Game`](crate::Game).
    fn game_result(&self, position: &Position) -> Option<GameResult>;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_result(position).is_some()
    }
}
