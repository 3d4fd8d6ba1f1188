//! Core types for Tafl games.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceType`] and [`Color`] for piece representation, plus the
//!   raw cell codec in [`codec`]
//! - [`Move`] for move representation and notation
//! - [`TaflError`], the error kinds shared by every board query
//! - FEN parsing and serialization for Tafl boards

pub mod codec;
mod color;
mod error;
mod fen;
mod mov;
mod piece;

pub use codec::CodecError;
pub use color::Color;
pub use error::TaflError;
pub use fen::{Fen, FenError};
pub use mov::{cell_from_notation, cell_to_notation, Move, NotationError, MAX_NOTATION_WIDTH};
pub use piece::{Cell, Piece, PieceType};
