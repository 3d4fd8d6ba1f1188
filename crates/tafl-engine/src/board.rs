//! Mailbox board representation.

use crate::geometry::{Geometry, Offset};
use std::fmt;
use std::sync::Arc;
use tafl_core::{codec, Cell, Color, Piece, PieceType, TaflError};

/// A square grid of cells, row-major.
///
/// The board shares its [`Geometry`] with every other board of the same
/// width; cloning a board copies the cells only.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Arc<Geometry>,
    cells: Vec<Cell>,
}

/// Returns true if `other` is occupied by a piece whose color differs from
/// `reference`. An empty reference differs from every color.
#[inline]
fn hostile_pair(reference: Cell, other: Cell) -> bool {
    match (reference, other) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(a), Some(b)) => a.color != b.color,
    }
}

impl Board {
    /// Creates an empty board.
    pub fn empty(geometry: Arc<Geometry>) -> Self {
        let cells = vec![None; geometry.len()];
        Board { geometry, cells }
    }

    /// Creates an empty standard 11x11 board.
    pub fn standard() -> Self {
        Self::empty(Geometry::standard())
    }

    /// Creates a board from typed cells.
    ///
    /// Fails with [`TaflError::InvalidIndex`] naming the first missing or
    /// surplus cell if the length does not match the geometry.
    pub fn from_cells(geometry: Arc<Geometry>, cells: Vec<Cell>) -> Result<Self, TaflError> {
        if cells.len() != geometry.len() {
            return Err(TaflError::invalid_index(
                cells.len().min(geometry.len()) as i64,
                geometry.len(),
            ));
        }
        Ok(Board { geometry, cells })
    }

    /// Builds a board from cells already sized to the geometry.
    pub(crate) fn from_sized_cells(geometry: Arc<Geometry>, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), geometry.len());
        Board { geometry, cells }
    }

    /// Decodes a flat host board.
    pub fn from_raw(geometry: Arc<Geometry>, raw: &[i32]) -> Result<Self, TaflError> {
        let cells = raw
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                codec::decode_i32(value).map_err(|_| TaflError::MalformedBoard { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(geometry, cells)
    }

    /// Encodes the board for the host.
    pub fn to_raw(&self) -> Vec<i32> {
        self.cells.iter().map(|&c| codec::encode(c) as i32).collect()
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns a handle to the shared geometry.
    #[inline]
    pub fn shared_geometry(&self) -> Arc<Geometry> {
        Arc::clone(&self.geometry)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `index`. The index must be on the board.
    #[inline]
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Checked variant of [`get`](Self::get).
    pub fn try_get(&self, index: usize) -> Result<Cell, TaflError> {
        self.geometry.check_index(index).map(|i| self.cells[i])
    }

    #[inline]
    pub fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Empties the cell and returns what stood there.
    #[inline]
    pub fn take(&mut self, index: usize) -> Cell {
        self.cells[index].take()
    }

    /// Returns true if `j` holds a piece whose color differs from the piece on `i`.
    ///
    /// Indices are not checked.
    #[inline]
    pub fn is_enemy(&self, i: usize, j: usize) -> bool {
        hostile_pair(self.cells[i], self.cells[j])
    }

    /// Returns true if any orthogonal neighbour of `index` holds an enemy of
    /// `piece` (the piece on `index` when `None`).
    pub fn has_neighbor_enemies(&self, index: usize, piece: Option<Piece>) -> bool {
        let reference = piece.or(self.cells[index]);
        self.geometry
            .orthogonal()
            .into_iter()
            .filter_map(|offset| self.geometry.neighbor(index, offset))
            .any(|n| hostile_pair(reference, self.cells[n]))
    }

    /// Yields `(direction, cell)` for every orthogonal neighbour of `index`
    /// holding an enemy, in north, west, east, south order.
    pub fn neighbor_enemies(&self, index: usize) -> impl Iterator<Item = (Offset, usize)> + '_ {
        self.geometry
            .orthogonal()
            .into_iter()
            .filter_map(move |offset| self.geometry.neighbor(index, offset).map(|n| (offset, n)))
            .filter(move |&(_, n)| self.is_enemy(index, n))
    }

    /// Iterates over occupied cells.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|p| (i, p)))
    }

    /// Iterates over the cells occupied by `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Counts the pieces of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Locates the defending king.
    pub fn find_king(&self) -> Option<usize> {
        self.pieces_of(Color::White)
            .find(|(_, p)| p.kind == PieceType::King)
            .map(|(i, _)| i)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{})\n{}", self.width(), self.width(), self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width()) {
            for cell in row {
                let c = match cell {
                    Some(piece) => piece.to_fen_char(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
