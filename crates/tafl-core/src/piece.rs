//! Piece representation.

use crate::codec;
use crate::Color;
use serde::{Deserialize, Serialize};

/// The piece types the codec understands.
///
/// Tafl itself only uses kings and orthogonal sliders (encoded as rooks), but
/// the board encoding is shared with chess-like variants, so all six types
/// are representable. The discriminants are the raw type bits; an empty cell
/// has type bits 0 and is modelled as `None` rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    King = 1,
    Pawn = 2,
    Knight = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl PieceType {
    /// All piece types in encoding order.
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ];

    /// Returns the raw type bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Creates a piece type from its raw type bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(PieceType::King),
            2 => Some(PieceType::Pawn),
            3 => Some(PieceType::Knight),
            4 => Some(PieceType::Bishop),
            5 => Some(PieceType::Rook),
            6 => Some(PieceType::Queen),
            _ => None,
        }
    }

    /// Returns true if this piece slides until blocked (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceType::King => "King",
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece standing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

/// The content of one board cell.
pub type Cell = Option<Piece>;

impl Piece {
    /// The defending king.
    pub const WHITE_KING: Piece = Piece::new(PieceType::King, Color::White);
    /// A defending soldier.
    pub const WHITE_SOLDIER: Piece = Piece::new(PieceType::Rook, Color::White);
    /// An attacking soldier.
    pub const BLACK_SOLDIER: Piece = Piece::new(PieceType::Rook, Color::Black);

    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Packs this piece into its raw cell value.
    #[inline]
    pub const fn encode(self) -> u8 {
        self.kind.bits() | self.color.flag()
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceType::King)
    }

    /// Returns true if `other` belongs to the opposing side.
    #[inline]
    pub fn is_enemy_of(self, other: Piece) -> bool {
        self.color != other.color
    }

    /// Returns the board notation character (`k`, `w`, or `b`).
    ///
    /// Any non-king piece is written as a plain soldier of its color.
    pub const fn to_fen_char(self) -> char {
        match (self.kind, self.color) {
            (PieceType::King, Color::White) => 'k',
            (_, color) => color.to_fen_char(),
        }
    }

    /// Parses a board notation character. `e` is an empty cell.
    pub const fn from_fen_char(c: char) -> Option<Cell> {
        match c {
            'e' => Some(None),
            'w' => Some(Some(Piece::WHITE_SOLDIER)),
            'b' => Some(Some(Piece::BLACK_SOLDIER)),
            'k' => Some(Some(Piece::WHITE_KING)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

impl TryFrom<u8> for Piece {
    type Error = codec::CodecError;

    /// Decodes an occupied cell; an empty value is reported as a missing type.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        codec::decode(raw)?.ok_or(codec::CodecError::ColorWithoutType(raw))
    }
}
