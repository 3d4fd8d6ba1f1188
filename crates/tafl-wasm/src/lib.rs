//! WebAssembly bindings for the Tafl engine.
//!
//! This crate provides a JavaScript-friendly API for the rules engine and
//! the bot, allowing them to run in web browsers and Node.js.
//!
//! # Usage
//!
//! ```javascript
//! import init, { Game, getBestMove } from 'tafl-wasm';
//!
//! await init();
//!
//! const game = new Game();
//! game.makeMove("d11-d9");
//!
//! // flat board, side to move (8 = white, 16 = black), king cell
//! const [from, to] = getBestMove(game.board(), 8, game.kingIndex());
//! ```

use serde::Serialize;
use tafl_bot::{best_move, search_position, BotConfig};
use tafl_core::Color;
use tafl_engine::{Position, RuleOptions};
use wasm_bindgen::prelude::*;

/// Picks a move for the side to move with the default search depth.
///
/// Returns a fresh `[from, to]` array owned by the caller.
#[wasm_bindgen(js_name = getBestMove)]
pub fn get_best_move(board: &[i32], color_to_move: i32, king_index: i32) -> Result<Vec<i32>, JsError> {
    get_best_move_with_depth(board, color_to_move, king_index, tafl_bot::config::DEFAULT_DEPTH)
}

/// Like [`get_best_move`], searching `depth` plies.
#[wasm_bindgen(js_name = getBestMoveWithDepth)]
pub fn get_best_move_with_depth(
    board: &[i32],
    color_to_move: i32,
    king_index: i32,
    depth: u8,
) -> Result<Vec<i32>, JsError> {
    let config = BotConfig::default().with_depth(depth.max(1));
    let pair = best_move(board, color_to_move, king_index, &config)?;
    Ok(pair.iter().map(|&i| i as i32).collect())
}

/// One entry of [`Game::history`].
#[derive(Serialize)]
struct HistoryEntry {
    notation: String,
    from: usize,
    to: usize,
    captured: Vec<usize>,
    fen: String,
}

/// A Tafl game that can be manipulated from JavaScript.
#[wasm_bindgen]
pub struct Game {
    game: tafl_engine::Game,
}

#[wasm_bindgen]
impl Game {
    /// Creates a new game with the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Game {
            game: tafl_engine::Game::new(),
        }
    }

    /// Creates a game from a FEN string.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<Game, JsError> {
        let game = tafl_engine::Game::from_fen(fen)?;
        Ok(Game { game })
    }

    /// Creates a game from a FEN string and a rule options object such as
    /// `{ king_slides: false }`. Missing fields take their defaults.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(fen: &str, options: JsValue) -> Result<Game, JsError> {
        let options: RuleOptions = if options.is_undefined() || options.is_null() {
            RuleOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let position = Position::from_fen(fen)?;
        Ok(Game {
            game: tafl_engine::Game::from_position(position, options),
        })
    }

    /// Returns the current position as a FEN string.
    #[wasm_bindgen(js_name = toFen)]
    pub fn to_fen(&self) -> String {
        self.game.to_fen()
    }

    /// Returns the board as 121 raw cell values.
    pub fn board(&self) -> Vec<i32> {
        self.game.position().board().to_raw()
    }

    /// Returns the king's cell, or undefined once the king is gone.
    #[wasm_bindgen(js_name = kingIndex)]
    pub fn king_index(&self) -> Option<u32> {
        self.game.position().king().map(|k| k as u32)
    }

    /// Returns the legal moves in notation, e.g. "d11-d9".
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<String> {
        self.game
            .legal_moves()
            .as_slice()
            .iter()
            .map(|&m| self.game.notation(m))
            .collect()
    }

    /// Makes a move given in notation and returns the captured cells.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, notation: &str) -> Result<Vec<u32>, JsError> {
        let record = self.game.make_move_notation(notation)?;
        Ok(record.captured.iter().map(|&c| c as u32).collect())
    }

    /// Lets the bot play one move and returns it in notation.
    #[wasm_bindgen(js_name = botMove)]
    pub fn bot_move(&mut self, depth: u8) -> Result<String, JsError> {
        let config = BotConfig {
            depth: depth.max(1),
            rules: *self.game.rules().options(),
            ..BotConfig::default()
        };
        let result = search_position(self.game.position(), &config)?;
        let record = self.game.make_move(result.best_move)?;
        Ok(record.notation.clone())
    }

    /// Returns true if the game is over.
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Returns the winner ("white" or "black"), or null while the game is on.
    pub fn winner(&self) -> Option<String> {
        self.game.result().map(|r| side_name(r.winner).to_string())
    }

    /// Describes the result, e.g. "defenders win by king escaped".
    pub fn result(&self) -> Option<String> {
        self.game.result().map(|r| r.to_string())
    }

    /// Returns the side to move ("white" or "black").
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        side_name(self.game.position().side_to_move).to_string()
    }

    /// Resigns for the side to move.
    pub fn resign(&mut self) -> Result<(), JsError> {
        self.game.resign()?;
        Ok(())
    }

    /// Returns the move record as an array of
    /// `{ notation, from, to, captured, fen }` objects.
    pub fn history(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.history_entries())?)
    }

    /// Resets the game to the starting position with the same rules.
    pub fn reset(&mut self) {
        self.game = tafl_engine::Game::with_options(*self.game.rules().options());
    }
}

impl Game {
    fn history_entries(&self) -> Vec<HistoryEntry> {
        self.game
            .move_history()
            .iter()
            .map(|record| HistoryEntry {
                notation: record.notation.clone(),
                from: record.mov.from(),
                to: record.mov.to(),
                captured: record.captured.clone(),
                fen: record.fen.clone(),
            })
            .collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_new() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), "black");
        assert_eq!(game.legal_moves().len(), 116);
        assert_eq!(game.king_index(), Some(60));
        assert_eq!(game.board().len(), 121);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn game_from_fen() {
        let game = Game::from_fen("e5ke9b_w").unwrap();
        assert_eq!(game.side_to_move(), "white");
        assert_eq!(game.king_index(), Some(5));
    }

    #[test]
    fn make_move_reports_captures() {
        let mut game = Game::from_fen("e43we9wbe5ke3wbe8w_w").unwrap();
        let mut captured = game.make_move("i5-k5").unwrap();
        captured.sort();
        assert_eq!(captured, vec![54, 65]);
        assert_eq!(game.winner(), Some("white".to_string()));
        assert_eq!(
            game.result(),
            Some("defenders win by no legal moves".to_string())
        );
    }

    #[test]
    fn history_entries() {
        let mut game = Game::new();
        game.make_move("d11-d9").unwrap();
        let history = game.history_entries();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].notation, "d11-d9");
        assert_eq!((history[0].from, history[0].to), (3, 25));
        assert!(history[0].captured.is_empty());
    }

    #[test]
    fn best_move_is_an_owned_pair() {
        let game = Game::from_fen("e5ke9b_w").unwrap();
        let pair = get_best_move(&game.board(), 8, 5).unwrap();
        assert_eq!(pair, vec![5, 0]);
    }

    #[test]
    fn bot_move_plays_for_the_side_to_move() {
        let mut game = Game::new();
        let notation = game.bot_move(1).unwrap();
        assert!(Game::new().legal_moves().contains(&notation));
        assert_eq!(game.side_to_move(), "white");
    }

    #[test]
    fn reset() {
        let mut game = Game::new();
        game.make_move("d11-d9").unwrap();
        game.reset();
        assert_eq!(game.to_fen(), tafl_core::Fen::STARTPOS);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn illegal_move_is_an_error() {
        let mut game = Game::new();
        assert!(game.make_move("d11-a11").is_err());
        assert_eq!(game.to_fen(), tafl_core::Fen::STARTPOS);
    }

    #[wasm_bindgen_test]
    fn bad_side_flag_is_an_error() {
        let game = Game::new();
        assert!(get_best_move(&game.board(), 3, 60).is_err());
    }

    #[wasm_bindgen_test]
    fn options_from_a_js_object() {
        let options = serde_wasm_bindgen::to_value(&RuleOptions {
            king_slides: false,
            ..RuleOptions::default()
        })
        .unwrap();
        let game = Game::with_options("e50k_w", options).unwrap();
        assert_eq!(game.legal_moves().len(), 4);
    }
}
