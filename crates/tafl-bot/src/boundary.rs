//! The flat-board entry point used by hosts.
//!
//! Hosts exchange boards as 121 raw cell values (see [`tafl_core::codec`]),
//! the side to move as a color flag and the king's cell as an integer.

use crate::search::{self, SearchResult};
use crate::BotConfig;
use tafl_core::{Color, TaflError};
use tafl_engine::{Geometry, Position};
use thiserror::Error;
use tracing::{info, warn};

/// Errors reported to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    #[error("side to move must be 8 (white) or 16 (black), got {0}")]
    InvalidSide(i32),

    #[error("cell {0} does not hold the king")]
    NotTheKing(usize),

    #[error(transparent)]
    Board(#[from] TaflError),
}

/// Decodes the host arguments into a position.
///
/// The king index must name the cell holding the defending king.
pub fn decode_position(
    board: &[i32],
    color_to_move: i32,
    king_index: i32,
) -> Result<Position, BoundaryError> {
    let side = Color::from_flag(color_to_move).ok_or(BoundaryError::InvalidSide(color_to_move))?;
    let geometry = Geometry::standard();
    let king = geometry.index_from_i32(king_index)?;
    let position = Position::from_raw(geometry, board, side)?;

    if position.king() != Some(king) {
        return Err(BoundaryError::NotTheKing(king));
    }
    Ok(position)
}

/// Picks a move for the side to move and returns it as an owned
/// `[from, to]` pair.
pub fn best_move(
    board: &[i32],
    color_to_move: i32,
    king_index: i32,
    config: &BotConfig,
) -> Result<[usize; 2], BoundaryError> {
    let position = decode_position(board, color_to_move, king_index)?;
    let result = search_position(&position, config)?;
    Ok(result.best_move.to_pair())
}

/// Searches a decoded position, logging the outcome.
pub fn search_position(position: &Position, config: &BotConfig) -> Result<SearchResult, TaflError> {
    let width = position.geometry().width();
    match search::search(position, config) {
        Ok(result) => {
            info!(
                side = ?position.side_to_move,
                score = result.score,
                nodes = result.nodes,
                "best move {}",
                result
                    .best_move
                    .to_notation(width)
                    .unwrap_or_else(|_| result.best_move.to_string())
            );
            Ok(result)
        }
        Err(e) => {
            warn!(fen = %position.to_fen(), "{}", e);
            Err(e)
        }
    }
}
