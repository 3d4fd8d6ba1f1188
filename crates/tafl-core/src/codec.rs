//! Raw cell codec.
//!
//! Hosts exchange boards as flat integer arrays. Each cell packs the piece
//! type into the low three bits and the color into a separate bit flag, so
//! type and color can be masked independently:
//!
//! ```text
//!   bit  4     3     2..0
//!      Black White   type (0 = none, 1..=6 = King..Queen)
//! ```
//!
//! Inside the engine cells are typed ([`Cell`]); this module is the only place
//! that knows the bit layout.

use crate::{Cell, Color, Piece, PieceType};
use thiserror::Error;

/// Mask selecting the piece type bits.
pub const TYPE_MASK: u8 = 0b0_0111;
/// Mask selecting the color bits.
pub const COLOR_MASK: u8 = 0b1_1000;
/// Color flag for the defending side.
pub const WHITE: u8 = 0b0_1000;
/// Color flag for the attacking side.
pub const BLACK: u8 = 0b1_0000;

/// Errors produced when a raw value does not describe a valid cell.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("value {0} does not fit in a cell")]
    OutOfRange(i32),

    #[error("value {0:#07b} has an unknown piece type")]
    UnknownType(u8),

    #[error("value {0:#07b} has a piece type but no color")]
    MissingColor(u8),

    #[error("value {0:#07b} has a color but no piece type")]
    ColorWithoutType(u8),

    #[error("value {0:#07b} sets both colors")]
    BothColors(u8),
}

/// Returns the type bits of a raw cell.
#[inline]
pub const fn piece_type(raw: u8) -> u8 {
    raw & TYPE_MASK
}

/// Returns the color bits of a raw cell.
#[inline]
pub const fn piece_color(raw: u8) -> u8 {
    raw & COLOR_MASK
}

/// Returns true if the White flag is set.
#[inline]
pub const fn is_white(raw: u8) -> bool {
    raw & WHITE != 0
}

/// Returns true if the Black flag is set.
#[inline]
pub const fn is_black(raw: u8) -> bool {
    raw & BLACK != 0
}

/// Toggles a color flag between White and Black.
///
/// Anything other than White, an empty color included, maps to White.
#[inline]
pub const fn opposite_color(raw: u8) -> u8 {
    if piece_color(raw) == WHITE {
        BLACK
    } else {
        WHITE
    }
}

/// Packs a cell into its raw value.
#[inline]
pub const fn encode(cell: Cell) -> u8 {
    match cell {
        Some(piece) => piece.encode(),
        None => 0,
    }
}

/// Unpacks a raw value, rejecting anything that violates the codec invariants.
pub fn decode(raw: u8) -> Result<Cell, CodecError> {
    if raw & !(TYPE_MASK | COLOR_MASK) != 0 {
        return Err(CodecError::OutOfRange(raw as i32));
    }

    let kind_bits = piece_type(raw);
    let color_bits = piece_color(raw);

    match (kind_bits, color_bits) {
        (0, 0) => Ok(None),
        (0, _) => Err(CodecError::ColorWithoutType(raw)),
        (_, 0) => Err(CodecError::MissingColor(raw)),
        (_, COLOR_MASK) => Err(CodecError::BothColors(raw)),
        (bits, _) => {
            let kind = PieceType::from_bits(bits).ok_or(CodecError::UnknownType(raw))?;
            let color = if is_white(raw) { Color::White } else { Color::Black };
            Ok(Some(Piece::new(kind, color)))
        }
    }
}

/// Unpacks a host integer.
pub fn decode_i32(raw: i32) -> Result<Cell, CodecError> {
    let byte = u8::try_from(raw).map_err(|_| CodecError::OutOfRange(raw))?;
    decode(byte)
}
