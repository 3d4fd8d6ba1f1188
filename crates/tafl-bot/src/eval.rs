//! Static evaluation.
//!
//! Scores are from the defenders' point of view: positive favours White.
//! A decided position scores [`WIN_SCORE`] for the winner; otherwise the score
//! is the sum of
//! - material: the king plus the defenders' soldiers minus the attackers
//! - mobility: defender moves minus attacker moves
//! - king location from [`KING_LOCATION_SCORE`]
//! - king mobility: the number of king moves

use serde::{Deserialize, Serialize};
use tafl_core::Color;
use tafl_engine::{Copenhagen, Position, RuleOptions, RuleSet};

/// Score of a won position.
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Bonus by king cell on the 11x11 board. Cells next to a corner are all but
/// won; the centre is the least promising place for the king.
#[rustfmt::skip]
pub const KING_LOCATION_SCORE: [i32; 121] = [
    0, 100_000_000, 75, 75, 75, 75, 75, 75, 75, 100_000_000, 0,
    100_000_000, 80, 80, 80, 80, 80, 80, 80, 80, 80, 100_000_000,
    75, 80, 60, 60, 60, 60, 60, 60, 60, 80, 75,
    75, 80, 60, 40, 40, 40, 40, 40, 60, 80, 75,
    75, 80, 60, 40, 0, -10, 0, 40, 60, 80, 75,
    75, 80, 60, 40, -10, 0, -10, 40, 60, 80, 75,
    75, 80, 60, 40, 0, -10, 0, 40, 60, 80, 75,
    75, 80, 60, 40, 40, 40, 40, 40, 60, 80, 75,
    75, 80, 60, 60, 60, 60, 60, 60, 60, 80, 75,
    100_000_000, 80, 80, 80, 80, 80, 80, 80, 80, 80, 100_000_000,
    0, 100_000_000, 75, 75, 75, 75, 75, 75, 75, 100_000_000, 0,
];

/// Term weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EvalWeights {
    pub king: i32,
    /// Value of every soldier on either side.
    pub piece: i32,
    /// Per move of difference in mobility.
    pub mobility: i32,
    /// Per king move.
    pub king_mobility: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            king: 12_000,
            piece: 1_000,
            mobility: 1,
            king_mobility: 1,
        }
    }
}

/// Looks up the location bonus for a king on `cell`. Boards other than 11x11
/// carry no location table.
pub fn king_location_score(width: usize, cell: usize) -> i32 {
    if width * width == KING_LOCATION_SCORE.len() {
        KING_LOCATION_SCORE.get(cell).copied().unwrap_or(0)
    } else {
        0
    }
}

/// Evaluates positions under one set of rules and weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    rules: Copenhagen,
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(options: RuleOptions, weights: EvalWeights) -> Self {
        Evaluator {
            rules: Copenhagen::new(options),
            weights,
        }
    }

    pub fn rules(&self) -> &Copenhagen {
        &self.rules
    }

    /// Evaluates `position` for the defenders.
    pub fn evaluate(&self, position: &Position) -> i32 {
        if let Some(result) = self.rules.game_result(position) {
            return match result.winner {
                Color::White => WIN_SCORE,
                Color::Black => -WIN_SCORE,
            };
        }
        self.heuristic(position)
    }

    /// The score of an undecided position.
    pub fn heuristic(&self, position: &Position) -> i32 {
        let board = position.board();
        let w = &self.weights;
        let generator = self.rules.options().move_generator();

        let defenders = board.count(Color::White) as i32;
        let attackers = board.count(Color::Black) as i32;
        let king = position.king();

        let soldiers = if king.is_some() { defenders - 1 } else { defenders };
        let mut score = soldiers * w.piece - attackers * w.piece;

        let white_moves = generator.generate(board, Color::White).len() as i32;
        let black_moves = generator.generate(board, Color::Black).len() as i32;
        score += (white_moves - black_moves) * w.mobility;

        if let Some(king) = king {
            score += w.king;
            score += king_location_score(board.width(), king);
            score += generator.destinations(board, king).count() as i32 * w.king_mobility;
        }
        score
    }
}
