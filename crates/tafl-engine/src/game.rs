//! Full game management with history tracking.
//!
//! The [`Game`] struct adds what a single [`Position`] cannot know:
//! - the move record with notation and captured cells
//! - repetition counts for the perpetual-repetition rule
//! - resignation

use crate::rules::{Copenhagen, GameResult, RuleOptions, RuleSet, WinCondition};
use crate::{MoveList, Position};
use std::collections::HashMap;
use tafl_core::{Color, FenError, Move, NotationError, TaflError};
use thiserror::Error;

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move in internal format.
    pub mov: Move,
    /// Notation for the move, e.g. "i5-k5".
    pub notation: String,
    /// Cells cleared by the move.
    pub captured: Vec<usize>,
    /// FEN of the position after the move.
    pub fen: String,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    InvalidNotation(#[from] NotationError),

    #[error(transparent)]
    InvalidFen(#[from] FenError),

    #[error(transparent)]
    Board(#[from] TaflError),

    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
}

/// A complete Tafl game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    rules: Copenhagen,
    position: Position,
    start_pos: Position,
    moves: Vec<GameMove>,
    /// Occurrences of every position reached, keyed by FEN.
    seen: HashMap<String, u32>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position and rules.
    pub fn new() -> Self {
        Self::with_options(RuleOptions::default())
    }

    /// Creates a new game from the starting position with custom rules.
    pub fn with_options(options: RuleOptions) -> Self {
        let rules = Copenhagen::new(options);
        Self::from_position(rules.initial_position(), options)
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position, options: RuleOptions) -> Self {
        let mut seen = HashMap::new();
        seen.insert(position.to_fen(), 1);
        let mut game = Game {
            rules: Copenhagen::new(options),
            start_pos: position.clone(),
            position,
            moves: Vec::new(),
            seen,
            result: None,
        };
        game.check_game_end();
        game
    }

    /// Creates a game from a FEN string with the default rules.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position, RuleOptions::default()))
    }

    pub fn rules(&self) -> &Copenhagen {
        &self.rules
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        &self.start_pos
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        if self.result.is_some() {
            return MoveList::new();
        }
        self.rules.generate_moves(&self.position)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Counts how many times the current position has occurred.
    pub fn position_count(&self) -> u32 {
        self.seen.get(&self.position.to_fen()).copied().unwrap_or(0)
    }

    /// Makes a move given in internal format.
    pub fn make_move(&mut self, m: Move) -> Result<&GameMove, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        self.position.geometry().check_index(m.from())?;
        self.position.geometry().check_index(m.to())?;

        if !self.rules.is_legal(&self.position, m) {
            return Err(GameError::IllegalMove(self.notation(m)));
        }

        Ok(self.apply_move(m))
    }

    /// Makes a move given in notation such as "i5-k5".
    pub fn make_move_notation(&mut self, notation: &str) -> Result<&GameMove, GameError> {
        let m = Move::from_notation(notation, self.position.geometry().width())?;
        self.make_move(m)
    }

    /// Returns the notation for a move on this board, or the raw cell
    /// indices if a cell is off the board.
    pub fn notation(&self, m: Move) -> String {
        m.to_notation(self.position.geometry().width())
            .unwrap_or_else(|_| m.to_string())
    }

    fn apply_move(&mut self, m: Move) -> &GameMove {
        let notation = self.notation(m);
        let captured = self.rules.apply_move(&mut self.position, m);
        let fen = self.position.to_fen();
        *self.seen.entry(fen.clone()).or_insert(0) += 1;

        self.moves.push(GameMove {
            mov: m,
            notation,
            captured,
            fen,
        });

        self.check_game_end();
        &self.moves[self.moves.len() - 1]
    }

    /// Checks if the game has ended and updates the result.
    fn check_game_end(&mut self) {
        let options = *self.rules.options();
        if options.repetition_loses_for_defenders
            && self.position_count() >= options.repetition_limit
        {
            if let Some(decided) = self.rules.game_result(&self.position) {
                if decided.condition != WinCondition::NoLegalMoves {
                    self.result = Some(decided);
                    return;
                }
            }
            self.result = Some(GameResult::new(Color::Black, WinCondition::Repetition));
            return;
        }

        self.result = self.rules.game_result(&self.position);
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        self.result = Some(GameResult::new(
            self.position.side_to_move.opposite(),
            WinCondition::Resignation,
        ));
        Ok(())
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert_eq!(game.position_count(), 1);
        assert_eq!(game.legal_moves().len(), 116);
    }

    #[test]
    fn make_move_notation() {
        let mut game = Game::new();
        let record = game.make_move_notation("d11-d10").unwrap();
        assert_eq!(record.notation, "d11-d10");
        assert_eq!(record.mov, Move::new(3, 14));
        assert!(record.captured.is_empty());
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.position().side_to_move, Color::White);
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move_notation("d11-a11"),
            Err(GameError::IllegalMove("d11-a11".to_string()))
        );
        assert!(matches!(
            game.make_move_notation("d11"),
            Err(GameError::InvalidNotation(_))
        ));
        assert_eq!(
            game.make_move(Move::new(3, 200)),
            Err(GameError::Board(TaflError::invalid_index(200, 121)))
        );
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn records_captures() {
        let mut game = Game::from_fen("e43we9wbe5ke3wbe8w_w").unwrap();
        let record = game.make_move_notation("i5-k5").unwrap();
        let mut captured = record.captured.clone();
        captured.sort();
        assert_eq!(captured, vec![54, 65]);
        assert_eq!(record.fen, "e43we9we6ke3we11w_b");
        // the attackers have nothing left
        assert_eq!(
            game.result(),
            Some(GameResult::new(Color::White, WinCondition::NoLegalMoves))
        );
    }

    #[test]
    fn escape_ends_the_game() {
        let mut game = Game::from_fen("e5ke9b_w").unwrap();
        game.make_move_notation("f11-a11").unwrap();
        assert!(game.is_game_over());
        assert_eq!(
            game.result(),
            Some(GameResult::new(Color::White, WinCondition::Escape))
        );
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn cannot_move_after_game_over() {
        let mut game = Game::from_fen("e5ke9b_w").unwrap();
        game.make_move_notation("f11-a11").unwrap();
        assert_eq!(
            game.make_move_notation("e10-e9"),
            Err(GameError::GameAlreadyOver)
        );
        assert_eq!(game.resign(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn finished_start_position() {
        let game = Game::from_fen("k_b").unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::new(Color::White, WinCondition::Escape))
        );
    }

    #[test]
    fn resign() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::new(Color::White, WinCondition::Resignation))
        );
    }

    fn shuffle(game: &mut Game) {
        for notation in ["g7-h7", "b11-c11", "h7-g7", "c11-b11"] {
            game.make_move_notation(notation).unwrap();
        }
    }

    #[test]
    fn repetition_loses_for_defenders() {
        let mut game = Game::from_fen("ebe48k_w").unwrap();
        shuffle(&mut game);
        assert_eq!(game.position_count(), 2);
        assert!(!game.is_game_over());

        shuffle(&mut game);
        assert_eq!(game.position_count(), 3);
        assert_eq!(
            game.result(),
            Some(GameResult::new(Color::Black, WinCondition::Repetition))
        );
    }

    #[test]
    fn repetition_can_be_disabled() {
        let options = RuleOptions {
            repetition_loses_for_defenders: false,
            ..RuleOptions::default()
        };
        let position = Position::from_fen("ebe48k_w").unwrap();
        let mut game = Game::from_position(position, options);
        shuffle(&mut game);
        shuffle(&mut game);
        assert_eq!(game.position_count(), 3);
        assert!(!game.is_game_over());
    }
}
