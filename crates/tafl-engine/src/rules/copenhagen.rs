//! Copenhagen-style Hnefatafl rules.

use super::{GameResult, RuleOptions, RuleSet, WinCondition};
use crate::capture::{is_king_captured, resolve_captures};
use crate::encircle::{all_defenders_surrounded, is_exit_fort};
use crate::{MoveList, Position};
use tafl_core::{Color, Move};

/// Copenhagen Hnefatafl on an 11x11 board.
///
/// - Every soldier slides orthogonally; only the king may stop on or cross
///   the throne and the corners
/// - Custodian captures, with hostile squares and shield walls as configured
/// - The defenders win when the king reaches a corner or builds an exit fort
/// - The attackers win by capturing the king or surrounding every defender
/// - A side without a legal move loses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Copenhagen {
    options: RuleOptions,
}

impl Copenhagen {
    pub fn new(options: RuleOptions) -> Self {
        Copenhagen { options }
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Win conditions that do not need move generation.
    fn decided(&self, position: &Position) -> Option<GameResult> {
        let board = position.board();
        if let Some(king) = position.king() {
            if board.geometry().is_king_square(king) {
                return Some(GameResult::new(Color::White, WinCondition::Escape));
            }
            if is_king_captured(board, king, &self.options.capture_rules()) {
                return Some(GameResult::new(Color::Black, WinCondition::KingCaptured));
            }
        }
        if all_defenders_surrounded(board) {
            return Some(GameResult::new(Color::Black, WinCondition::Surrounded));
        }
        let fort = self.options.exit_fort
            && position
                .king()
                .is_some_and(|king| is_exit_fort(board, king));
        fort.then(|| GameResult::new(Color::White, WinCondition::ExitFort))
    }
}

impl RuleSet for Copenhagen {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        self.options
            .move_generator()
            .generate(position.board(), position.side_to_move)
    }

    fn is_legal(&self, position: &Position, m: Move) -> bool {
        let board = position.board();
        if m.from() >= board.len() {
            return false;
        }
        match board.get(m.from()) {
            Some(piece) if piece.color == position.side_to_move => self
                .options
                .move_generator()
                .destinations(board, m.from())
                .any(|to| to == m.to()),
            _ => false,
        }
    }

    fn apply_move(&self, position: &mut Position, m: Move) -> Vec<usize> {
        let board = position.board_mut();
        let piece = board.take(m.from());
        board.set(m.to(), piece);
        let captured = resolve_captures(board, m.to(), &self.options.capture_rules());

        if piece.is_some_and(|p| p.is_king()) {
            position.set_king(Some(m.to()));
        }
        position.side_to_move = position.side_to_move.opposite();
        captured
    }

    fn game_result(&self, position: &Position) -> Option<GameResult> {
        self.decided(position).or_else(|| {
            let side = position.side_to_move;
            let can_move = self
                .options
                .move_generator()
                .has_moves(position.board(), side);
            (!can_move).then(|| GameResult::new(side.opposite(), WinCondition::NoLegalMoves))
        })
    }
}
