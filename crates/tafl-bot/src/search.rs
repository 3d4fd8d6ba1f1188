//! Alpha-beta search.
//!
//! A fixed-depth negamax over [`Copenhagen`] positions. Moves are tried in
//! order of a cheap guess so that cutoffs come early, and won or lost
//! positions carry the remaining depth so that quicker wins score higher.

use crate::eval::{Evaluator, WIN_SCORE};
use crate::BotConfig;
use tafl_core::{Color, Move, TaflError};
use tafl_engine::{Board, Copenhagen, Position, RuleSet};
use tracing::debug;

/// Larger than any score the search produces.
const INFINITY: i32 = i32::MAX;

/// Outcome of a search from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score from the side to move's perspective.
    pub score: i32,
    /// Positions visited.
    pub nodes: u64,
}

/// Guesses how promising a move is before searching it.
///
/// Longer moves, king moves and moves that leave or enter contact with the
/// enemy are tried first.
pub fn guess_move_score(board: &Board, m: Move) -> i32 {
    let width = board.width();
    let (from_row, from_col) = (m.from() / width, m.from() % width);
    let (to_row, to_col) = (m.to() / width, m.to() % width);
    let mut guess = (from_row.abs_diff(to_row) + from_col.abs_diff(to_col)) as i32;

    let piece = board.get(m.from());
    if piece.is_some_and(|p| p.is_king()) {
        guess += 100;
    }
    if board.has_neighbor_enemies(m.from(), None) {
        guess += 50;
    }
    if board.has_neighbor_enemies(m.to(), piece) {
        guess += 50;
    }
    guess
}

/// Generates the moves of the side to move, best guess first.
pub fn ordered_moves(rules: &Copenhagen, position: &Position) -> Vec<Move> {
    let board = position.board();
    let mut scored: Vec<(i32, Move)> = rules
        .generate_moves(position)
        .as_slice()
        .iter()
        .map(|&m| (guess_move_score(board, m), m))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, m)| m).collect()
}

/// Search state.
pub struct Searcher {
    evaluator: Evaluator,
    nodes: u64,
}

impl Searcher {
    pub fn new(config: &BotConfig) -> Self {
        Searcher {
            evaluator: Evaluator::new(config.rules, config.weights),
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn rules(&self) -> Copenhagen {
        *self.evaluator.rules()
    }

    /// Searches `depth` plies and returns the best move for the side to move.
    ///
    /// Fails with [`TaflError::NoLegalMoves`] if the side to move cannot move.
    pub fn search(&mut self, position: &Position, depth: u8) -> Result<SearchResult, TaflError> {
        let rules = self.rules();
        let moves = ordered_moves(&rules, position);
        let Some(&first) = moves.first() else {
            return Err(TaflError::NoLegalMoves(position.side_to_move));
        };

        self.nodes = 1;
        let depth = depth.max(1);
        let mut best_move = first;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        for m in moves {
            let next = rules.make_move(position, m);
            let score = -self.alpha_beta(&next, depth - 1, -beta, -alpha);
            if score > alpha {
                alpha = score;
                best_move = m;
            }
        }

        debug!(
            nodes = self.nodes,
            score = alpha,
            depth,
            "searched {}",
            best_move
                .to_notation(position.geometry().width())
                .unwrap_or_else(|_| best_move.to_string())
        );

        Ok(SearchResult {
            best_move,
            score: alpha,
            nodes: self.nodes,
        })
    }

    fn alpha_beta(&mut self, position: &Position, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let perspective = match position.side_to_move {
            Color::White => 1,
            Color::Black => -1,
        };

        if depth == 0 {
            return perspective * self.evaluator.evaluate(position);
        }

        let rules = self.rules();
        if let Some(result) = rules.game_result(position) {
            // prefer quicker wins and slower losses
            let score = WIN_SCORE + depth as i32;
            return if result.winner == position.side_to_move {
                score
            } else {
                -score
            };
        }

        for m in ordered_moves(&rules, position) {
            let next = rules.make_move(position, m);
            let score = -self.alpha_beta(&next, depth - 1, -beta, -alpha);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

/// Searches `position` with the configured depth.
pub fn search(position: &Position, config: &BotConfig) -> Result<SearchResult, TaflError> {
    Searcher::new(config).search(position, config.depth)
}
