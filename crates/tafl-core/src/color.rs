//! Player color representation.

use serde::{Deserialize, Serialize};

/// The two sides of a Tafl game.
///
/// White is the king-led defending side, Black the attacking side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, defenders first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the color bit this color occupies in a raw cell value.
    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Color::White => crate::codec::WHITE,
            Color::Black => crate::codec::BLACK,
        }
    }

    /// Parses a side-to-move flag as exchanged with the host (8 = White, 16 = Black).
    pub const fn from_flag(flag: i32) -> Option<Self> {
        if flag == crate::codec::WHITE as i32 {
            Some(Color::White)
        } else if flag == crate::codec::BLACK as i32 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Returns true for the defending side.
    #[inline]
    pub const fn is_defender(self) -> bool {
        matches!(self, Color::White)
    }

    /// Returns the FEN character for this color.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a FEN side-to-move character.
    #[inline]
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
