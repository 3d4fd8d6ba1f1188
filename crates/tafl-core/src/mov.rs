//! Move representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing move notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move notation '{0}': expected <from>-<to>, e.g. \"i5-k5\"")]
    Malformed(String),

    #[error("cell '{0}' is not on a {1}x{1} board")]
    OffBoard(String, usize),

    #[error("cell {0} cannot be named on a {1}x{1} board")]
    Unnamed(usize, usize),
}

/// Widest board whose files fit in `a..=z`.
pub const MAX_NOTATION_WIDTH: usize = 26;

/// A move of one piece from one cell to another.
///
/// Cells are row-major indices (`row * width + col`), row 0 at the top.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    from: u16,
    to: u16,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: usize, to: usize) -> Self {
        Move {
            from: from as u16,
            to: to as u16,
        }
    }

    /// Returns the source cell.
    #[inline]
    pub const fn from(self) -> usize {
        self.from as usize
    }

    /// Returns the destination cell.
    #[inline]
    pub const fn to(self) -> usize {
        self.to as usize
    }

    /// Returns the move as an owned `[from, to]` pair.
    #[inline]
    pub const fn to_pair(self) -> [usize; 2] {
        [self.from(), self.to()]
    }

    /// Returns the notation for this move on a board of the given width
    /// (e.g. "i5-k5").
    ///
    /// Files run `a..` from left to right, ranks `1..=width` from the bottom row
    /// up. Fails for cells that cannot be named, see [`cell_to_notation`].
    pub fn to_notation(self, width: usize) -> Result<String, NotationError> {
        Ok(format!(
            "{}-{}",
            cell_to_notation(self.from(), width)?,
            cell_to_notation(self.to(), width)?
        ))
    }

    /// Parses a move from notation on a board of the given width.
    pub fn from_notation(s: &str, width: usize) -> Result<Self, NotationError> {
        let (from, to) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| NotationError::Malformed(s.to_string()))?;
        let from = cell_from_notation(from, width)?;
        let to = cell_from_notation(to, width)?;
        Ok(Move::new(from, to))
    }
}

/// Formats a single cell index, e.g. `0` on an 11-wide board is "a11".
///
/// Boards wider than [`MAX_NOTATION_WIDTH`] run out of files, and `index`
/// must lie on the board.
pub fn cell_to_notation(index: usize, width: usize) -> Result<String, NotationError> {
    if width == 0 || width > MAX_NOTATION_WIDTH || index >= width * width {
        return Err(NotationError::Unnamed(index, width));
    }
    let col = index % width;
    let row = index / width;
    let file = char::from(b'a' + col as u8);
    Ok(format!("{}{}", file, width - row))
}

/// Parses a single cell such as "k5".
pub fn cell_from_notation(s: &str, width: usize) -> Result<usize, NotationError> {
    let off_board = || NotationError::OffBoard(s.to_string(), width);

    let mut chars = s.chars();
    let file = chars
        .next()
        .filter(char::is_ascii_lowercase)
        .ok_or_else(|| NotationError::Malformed(s.to_string()))?;
    let rank: usize = chars
        .as_str()
        .parse()
        .map_err(|_| NotationError::Malformed(s.to_string()))?;

    let col = (file as u8 - b'a') as usize;
    if col >= width || rank == 0 || rank > width {
        return Err(off_board());
    }
    let row = width - rank;
    Ok(row * width + col)
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} -> {})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_accessors() {
        let m = Move::new(60, 64);
        assert_eq!(m.from(), 60);
        assert_eq!(m.to(), 64);
        assert_eq!(m.to_pair(), [60, 64]);
    }

    #[test]
    fn cell_notation() {
        assert_eq!(cell_to_notation(0, 11).unwrap(), "a11");
        assert_eq!(cell_to_notation(10, 11).unwrap(), "k11");
        assert_eq!(cell_to_notation(110, 11).unwrap(), "a1");
        assert_eq!(cell_to_notation(60, 11).unwrap(), "f6");
        assert_eq!(cell_from_notation("f6", 11), Ok(60));
        assert_eq!(cell_from_notation("k1", 11), Ok(120));
    }

    #[test]
    fn move_notation_roundtrip() {
        let m = Move::from_notation("i5-k5", 11).unwrap();
        assert_eq!(m.to_notation(11).unwrap(), "i5-k5");
        assert_eq!(m.from(), 6 * 11 + 8);
        assert_eq!(m.to(), 6 * 11 + 10);
    }

    #[test]
    fn invalid_notation() {
        assert!(matches!(
            Move::from_notation("i5k5", 11),
            Err(NotationError::Malformed(_))
        ));
        assert!(matches!(
            Move::from_notation("l5-k5", 11),
            Err(NotationError::OffBoard(_, 11))
        ));
        assert!(matches!(
            Move::from_notation("a12-a1", 11),
            Err(NotationError::OffBoard(_, 11))
        ));
        assert!(matches!(
            Move::from_notation("a0-a1", 11),
            Err(NotationError::OffBoard(_, 11))
        ));
        assert!(matches!(
            Move::from_notation("A1-a2", 11),
            Err(NotationError::Malformed(_))
        ));
    }

    #[test]
    fn wide_boards_run_out_of_files() {
        assert_eq!(cell_to_notation(25, 26).unwrap(), "z26");
        assert_eq!(cell_to_notation(26 * 26 - 1, 26).unwrap(), "z1");
        assert_eq!(cell_to_notation(30, 40), Err(NotationError::Unnamed(30, 40)));
        assert_eq!(cell_to_notation(199, 200), Err(NotationError::Unnamed(199, 200)));
        assert_eq!(cell_to_notation(121, 11), Err(NotationError::Unnamed(121, 11)));
        assert_eq!(cell_to_notation(0, 0), Err(NotationError::Unnamed(0, 0)));
        assert!(Move::new(0, 30).to_notation(40).is_err());
    }

    #[test]
    fn widest_board_roundtrip() {
        for index in [0, 25, 337, 26 * 26 - 1] {
            let name = cell_to_notation(index, MAX_NOTATION_WIDTH).unwrap();
            assert_eq!(cell_from_notation(&name, MAX_NOTATION_WIDTH), Ok(index));
        }
    }
}
