//! Board notation parsing and serialization.
//!
//! A Tafl FEN is a run-length encoding of the row-major board followed by the
//! side to move:
//!
//! ```text
//! e3b5e8be16be4we4b2e3w3e3b3ew2kw2eb3e3w3e3b2e4we4be16be8b5_b
//! ```
//!
//! `e` is an empty cell, `b` an attacker, `w` a defender, `k` the king. Each
//! letter may be followed by a repeat count. A trailing run of empty cells is
//! left out.
//!
//! Boards saved without a side to move end in `_e`; they are read with the
//! defenders to move and written back with `_w`.

use crate::{Cell, Color, Piece};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: missing '_' before the side to move")]
    MissingSideToMove,

    #[error("invalid side to move: expected 'w', 'b' or 'e', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),

    #[error("invalid run length: {0}")]
    InvalidRunLength(String),

    #[error("board describes {count} cells, expected at most {expected}")]
    TooManyCells { count: usize, expected: usize },
}

/// Parsed FEN data: the cells of a board plus the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Row-major cells, always `width * width` long.
    pub cells: Vec<Cell>,
    /// The side to move.
    pub side_to_move: Color,
}

impl Fen {
    /// The standard 11x11 starting position, attackers to move.
    pub const STARTPOS: &'static str =
        "e3b5e8be16be4we4b2e3w3e3b3ew2kw2eb3e3w3e3b2e4we4be16be8b5_b";

    /// Parses a FEN string for a board of the given width.
    pub fn parse(fen: &str, width: usize) -> Result<Self, FenError> {
        let (placement, side) = fen.trim().rsplit_once('_').ok_or(FenError::MissingSideToMove)?;

        let mut side_chars = side.chars();
        let side_to_move = match (side_chars.next(), side_chars.next()) {
            (Some('e'), None) => Color::White,
            (Some(c), None) => Color::from_fen_char(c)
                .ok_or_else(|| FenError::InvalidActiveColor(side.to_string()))?,
            _ => return Err(FenError::InvalidActiveColor(side.to_string())),
        };

        let expected = width * width;
        let mut cells: Vec<Cell> = Vec::with_capacity(expected);

        let mut chars = placement.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            let cell = Piece::from_fen_char(c).ok_or(FenError::InvalidCharacter(c, pos))?;

            let mut digits = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }

            let count = if digits.is_empty() {
                1
            } else {
                digits
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| FenError::InvalidRunLength(format!("'{}{}'", c, digits)))?
            };

            if cells.len() + count > expected {
                return Err(FenError::TooManyCells {
                    count: cells.len() + count,
                    expected,
                });
            }
            cells.extend(std::iter::repeat(cell).take(count));
        }

        cells.resize(expected, None);

        Ok(Fen {
            cells,
            side_to_move,
        })
    }

    /// Converts the board back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        let last_occupied = self.cells.iter().rposition(Option::is_some);
        let occupied = match last_occupied {
            Some(last) => &self.cells[..=last],
            None => &self.cells[..0],
        };

        let mut runs = occupied.iter().map(|cell| fen_char(*cell)).peekable();
        while let Some(c) = runs.next() {
            let mut count = 1;
            while runs.peek() == Some(&c) {
                runs.next();
                count += 1;
            }
            fen.push(c);
            if count > 1 {
                fen.push_str(&count.to_string());
            }
        }

        fen.push('_');
        fen.push(self.side_to_move.to_fen_char());
        fen
    }
}

fn fen_char(cell: Cell) -> char {
    match cell {
        Some(piece) => piece.to_fen_char(),
        None => 'e',
    }
}
