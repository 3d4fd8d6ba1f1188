//! Tafl position representation.

use crate::{Board, Geometry};
use std::fmt;
use std::sync::Arc;
use tafl_core::{Color, Fen, FenError, TaflError};

/// A board plus the side to move.
///
/// The king's cell is tracked alongside the board so that the win checks do
/// not have to scan for it.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    king: Option<usize>,
    /// The side to move.
    pub side_to_move: Color,
}

impl Position {
    /// Creates a position, locating the king on the board.
    pub fn new(board: Board, side_to_move: Color) -> Self {
        let king = board.find_king();
        Position {
            board,
            king,
            side_to_move,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position on the standard board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with(fen, Geometry::standard())
    }

    /// Creates a position on the given geometry from a FEN string.
    pub fn from_fen_with(fen: &str, geometry: Arc<Geometry>) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen, geometry.width())?;
        let board = Board::from_sized_cells(geometry, parsed.cells);
        Ok(Self::new(board, parsed.side_to_move))
    }

    /// Decodes a flat host board.
    pub fn from_raw(
        geometry: Arc<Geometry>,
        raw: &[i32],
        side_to_move: Color,
    ) -> Result<Self, TaflError> {
        let board = Board::from_raw(geometry, raw)?;
        Ok(Self::new(board, side_to_move))
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        Fen {
            cells: self.board.cells().to_vec(),
            side_to_move: self.side_to_move,
        }
        .to_fen()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board. Moving the king through this handle must
    /// be followed by [`set_king`](Self::set_king).
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The cell holding the king, if there is one.
    #[inline]
    pub fn king(&self) -> Option<usize> {
        self.king
    }

    #[inline]
    pub fn set_king(&mut self, king: Option<usize>) {
        self.king = king;
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        self.board.geometry()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("king", &self.king)
            .finish()
    }
}
