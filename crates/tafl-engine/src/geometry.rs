//! Board geometry: direction offsets, distances to the edge, and special squares.
//!
//! Directions are plain row-major index offsets (`-width` is one row up), and
//! the distance table is keyed by those same offsets, so a move generator can
//! walk `index + offset * step` for `step in 1..=distance_to_edge(index, offset)`
//! without any further bounds checks.

use std::sync::{Arc, OnceLock};
use tafl_core::{TaflError, MAX_NOTATION_WIDTH};

/// A signed step in row-major index space.
pub type Offset = isize;

/// Width of the standard board.
pub const STANDARD_WIDTH: u8 = 11;

/// Narrowest board on which the eight ray offsets are distinct.
pub const MIN_WIDTH: u8 = 3;

/// Widest board whose files can still be lettered.
pub const MAX_WIDTH: u8 = MAX_NOTATION_WIDTH as u8;

/// A knight-style jump, as column and row deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub dx: isize,
    pub dy: isize,
}

/// The eight L-shaped jumps, ordered by their index offset.
const KNIGHT_JUMPS: [Jump; 8] = [
    Jump { dx: -1, dy: -2 },
    Jump { dx: 1, dy: -2 },
    Jump { dx: -2, dy: -1 },
    Jump { dx: 2, dy: -1 },
    Jump { dx: -2, dy: 1 },
    Jump { dx: 2, dy: 1 },
    Jump { dx: -1, dy: 2 },
    Jump { dx: 1, dy: 2 },
];

/// Precomputed geometry for a square board.
///
/// Built once per board width and immutable afterwards. The standard 11x11
/// instance is shared process-wide through [`Geometry::standard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    width: usize,
    len: usize,
    /// Steps to the edge per cell, in [`Geometry::all_directions`] order.
    edge: Vec<[u8; 8]>,
    corners: [usize; 4],
    throne: usize,
}

impl Geometry {
    /// Builds the geometry for a `width` x `width` board.
    ///
    /// # Panics
    ///
    /// Panics unless `width` is in `MIN_WIDTH..=MAX_WIDTH`; see
    /// [`Geometry::try_new`].
    pub fn new(width: u8) -> Self {
        assert!(
            (MIN_WIDTH..=MAX_WIDTH).contains(&width),
            "board width must be in {}..={}, got {}",
            MIN_WIDTH,
            MAX_WIDTH,
            width
        );
        let width = width as usize;
        let len = width * width;

        let edge = (0..len)
            .map(|i| {
                let x = i % width;
                let y = (i / width) % width;

                let north = y;
                let south = width - 1 - y;
                let west = x;
                let east = width - 1 - x;

                let north_east = north.min(east);
                let north_west = north.min(west);
                let south_east = south.min(east);
                let south_west = south.min(west);

                [
                    north_west, north, north_east, west, east, south_west, south, south_east,
                ]
                .map(|n| n as u8)
            })
            .collect();

        let half = width / 2;
        Geometry {
            width,
            len,
            edge,
            corners: [0, width - 1, len - width, len - 1],
            throne: half * width + half,
        }
    }

    /// Like [`Geometry::new`], reporting an unsupported width as
    /// [`TaflError::InvalidWidth`].
    pub fn try_new(width: u8) -> Result<Self, TaflError> {
        if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            Ok(Self::new(width))
        } else {
            Err(TaflError::InvalidWidth(width))
        }
    }

    /// Returns the shared 11x11 geometry, building it on first use.
    pub fn standard() -> Arc<Geometry> {
        static STANDARD: OnceLock<Arc<Geometry>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(Geometry::new(STANDARD_WIDTH)))
            .clone()
    }

    /// Number of cells per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an error unless `index` names a cell.
    #[inline]
    pub fn check_index(&self, index: usize) -> Result<usize, TaflError> {
        if index < self.len {
            Ok(index)
        } else {
            Err(TaflError::invalid_index(index as i64, self.len))
        }
    }

    /// Converts a host-supplied integer into a cell index.
    pub fn index_from_i32(&self, index: i32) -> Result<usize, TaflError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.len)
            .ok_or_else(|| TaflError::invalid_index(index, self.len))
    }

    /// The four orthogonal offsets: north, west, east, south.
    #[inline]
    pub fn orthogonal(&self) -> [Offset; 4] {
        let w = self.width as isize;
        [-w, -1, 1, w]
    }

    /// The four diagonal offsets: north-west, north-east, south-west, south-east.
    #[inline]
    pub fn diagonal(&self) -> [Offset; 4] {
        let w = self.width as isize;
        [-w - 1, -w + 1, w - 1, w + 1]
    }

    /// All eight ray offsets, ordered from north-west to south-east.
    #[inline]
    pub fn all_directions(&self) -> [Offset; 8] {
        let w = self.width as isize;
        [-w - 1, -w, -w + 1, -1, 1, w - 1, w, w + 1]
    }

    /// The eight knight jumps.
    #[inline]
    pub fn knight_jumps(&self) -> [Jump; 8] {
        KNIGHT_JUMPS
    }

    /// Index offset of a jump on this board (`dy * width + dx`).
    #[inline]
    pub fn jump_offset(&self, jump: Jump) -> Offset {
        jump.dy * self.width as isize + jump.dx
    }

    /// Returns the landing cell of a jump, or `None` if it leaves the board.
    pub fn jump_target(&self, index: usize, jump: Jump) -> Option<usize> {
        let w = self.width as isize;
        let x = (index % self.width) as isize + jump.dx;
        let y = (index / self.width) as isize + jump.dy;
        if (0..w).contains(&x) && (0..w).contains(&y) {
            Some((y * w + x) as usize)
        } else {
            None
        }
    }

    fn slot(&self, offset: Offset) -> Option<usize> {
        let w = self.width as isize;
        match offset {
            o if o == -w - 1 => Some(0),
            o if o == -w => Some(1),
            o if o == -w + 1 => Some(2),
            -1 => Some(3),
            1 => Some(4),
            o if o == w - 1 => Some(5),
            o if o == w => Some(6),
            o if o == w + 1 => Some(7),
            _ => None,
        }
    }

    /// Number of cells between `index` and the edge along `offset`.
    ///
    /// `index` must be on the board; offsets other than the eight ray offsets
    /// have no ray and report 0.
    #[inline]
    pub fn distance_to_edge(&self, index: usize, offset: Offset) -> usize {
        debug_assert!(index < self.len);
        match self.slot(offset) {
            Some(slot) => self.edge[index][slot] as usize,
            None => 0,
        }
    }

    /// Checked variant of [`distance_to_edge`](Self::distance_to_edge).
    pub fn try_distance_to_edge(&self, index: usize, offset: Offset) -> Result<usize, TaflError> {
        self.check_index(index)?;
        Ok(self.distance_to_edge(index, offset))
    }

    /// Moves `steps` cells along `offset`. The caller guarantees the result is
    /// on the board.
    #[inline]
    pub fn step(&self, index: usize, offset: Offset, steps: usize) -> usize {
        (index as isize + offset * steps as isize) as usize
    }

    /// Returns the neighbour along `offset`, if there is one.
    #[inline]
    pub fn neighbor(&self, index: usize, offset: Offset) -> Option<usize> {
        (self.distance_to_edge(index, offset) > 0).then(|| self.step(index, offset, 1))
    }

    /// Returns true if the cell touches the edge in any orthogonal direction.
    pub fn is_edge(&self, index: usize) -> bool {
        self.orthogonal()
            .iter()
            .any(|&o| self.distance_to_edge(index, o) == 0)
    }

    /// The four corner cells (king squares).
    #[inline]
    pub fn king_squares(&self) -> [usize; 4] {
        self.corners
    }

    /// Returns true if `index` is one of the four corners.
    #[inline]
    pub fn is_king_square(&self, index: usize) -> bool {
        self.corners.contains(&index)
    }

    /// The centre cell, where the king starts.
    #[inline]
    pub fn throne(&self) -> usize {
        self.throne
    }

    /// Returns true for corners and the throne.
    #[inline]
    pub fn is_special(&self, index: usize) -> bool {
        index == self.throne || self.is_king_square(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_board() {
        let g = Geometry::standard();
        assert_eq!(g.width(), 11);
        assert_eq!(g.len(), 121);
        assert_eq!(g.throne(), 60);
        assert_eq!(g.king_squares(), [0, 10, 110, 120]);
        assert!(Arc::ptr_eq(&g, &Geometry::standard()));
    }

    #[test]
    fn corners() {
        let g = Geometry::new(11);
        let [n, w, e, s] = g.orthogonal();
        let [nw, ne, sw, se] = g.diagonal();

        assert_eq!(g.distance_to_edge(0, n), 0);
        assert_eq!(g.distance_to_edge(0, w), 0);
        assert_eq!(g.distance_to_edge(0, nw), 0);
        assert_eq!(g.distance_to_edge(0, e), 10);
        assert_eq!(g.distance_to_edge(0, s), 10);
        assert_eq!(g.distance_to_edge(0, se), 10);
        assert_eq!(g.distance_to_edge(0, ne), 0);
        assert_eq!(g.distance_to_edge(0, sw), 0);

        assert_eq!(g.distance_to_edge(120, s), 0);
        assert_eq!(g.distance_to_edge(120, e), 0);
        assert_eq!(g.distance_to_edge(120, se), 0);
        assert_eq!(g.distance_to_edge(120, nw), 10);

        assert_eq!(g.distance_to_edge(10, n), 0);
        assert_eq!(g.distance_to_edge(10, e), 0);
        assert_eq!(g.distance_to_edge(10, ne), 0);
        assert_eq!(g.distance_to_edge(10, sw), 10);

        assert_eq!(g.distance_to_edge(110, s), 0);
        assert_eq!(g.distance_to_edge(110, w), 0);
        assert_eq!(g.distance_to_edge(110, sw), 0);
        assert_eq!(g.distance_to_edge(110, ne), 10);
    }

    #[test]
    fn centre_is_symmetric() {
        let g = Geometry::new(11);
        for offset in g.all_directions() {
            assert_eq!(g.distance_to_edge(60, offset), 5);
        }
    }

    #[test]
    fn ring_cells_touch_the_edge() {
        let g = Geometry::new(11);
        for i in 0..g.len() {
            let (x, y) = (i % 11, i / 11);
            let on_ring = x == 0 || y == 0 || x == 10 || y == 10;
            let any_zero = g
                .all_directions()
                .iter()
                .any(|&o| g.distance_to_edge(i, o) == 0);
            assert_eq!(on_ring, any_zero, "cell {}", i);
            assert_eq!(on_ring, g.is_edge(i), "cell {}", i);
        }
    }

    #[test]
    fn unknown_offset_has_no_ray() {
        let g = Geometry::new(11);
        assert_eq!(g.distance_to_edge(60, 2), 0);
        assert_eq!(g.distance_to_edge(60, 0), 0);
    }

    #[test]
    fn checked_queries() {
        let g = Geometry::new(11);
        assert_eq!(g.try_distance_to_edge(60, 1), Ok(5));
        assert_eq!(
            g.try_distance_to_edge(121, 1),
            Err(TaflError::invalid_index(121, 121))
        );
        assert_eq!(g.index_from_i32(120), Ok(120));
        assert_eq!(g.index_from_i32(-1), Err(TaflError::invalid_index(-1, 121)));
        assert_eq!(g.index_from_i32(121), Err(TaflError::invalid_index(121, 121)));
    }

    #[test]
    fn knight_offsets_match_width() {
        let g = Geometry::new(11);
        let mut offsets: Vec<_> = g.knight_jumps().iter().map(|&j| g.jump_offset(j)).collect();
        offsets.sort();
        assert_eq!(offsets, vec![-23, -21, -13, -9, 9, 13, 21, 23]);
    }

    #[test]
    fn jump_targets_stay_on_board() {
        let g = Geometry::new(11);
        let from_corner: Vec<_> = g
            .knight_jumps()
            .iter()
            .filter_map(|&j| g.jump_target(0, j))
            .collect();
        assert_eq!(from_corner.len(), 2);
        assert!(from_corner.contains(&13));
        assert!(from_corner.contains(&23));
    }

    #[test]
    fn width_limits() {
        assert_eq!(Geometry::try_new(0), Err(TaflError::InvalidWidth(0)));
        assert_eq!(Geometry::try_new(2), Err(TaflError::InvalidWidth(2)));
        assert_eq!(Geometry::try_new(27), Err(TaflError::InvalidWidth(27)));
        assert_eq!(Geometry::try_new(200), Err(TaflError::InvalidWidth(200)));

        // every ray keeps its own slot on the narrowest board
        let g = Geometry::try_new(MIN_WIDTH).unwrap();
        assert_eq!(g.throne(), 4);
        assert_eq!(g.distance_to_edge(0, 1), 2);
        assert_eq!(g.distance_to_edge(0, -1), 0);
        assert_eq!(g.distance_to_edge(0, 3), 2);
        assert_eq!(g.distance_to_edge(0, 4), 2);
        assert_eq!(g.distance_to_edge(0, 2), 0);
        assert_eq!(g.distance_to_edge(4, -4), 1);

        let g = Geometry::try_new(MAX_WIDTH).unwrap();
        let last = tafl_core::cell_to_notation(g.len() - 1, g.width()).unwrap();
        assert_eq!(last, "z1");
    }

    #[test]
    #[should_panic(expected = "board width")]
    fn two_wide_board_is_rejected() {
        Geometry::new(2);
    }

    #[test]
    fn other_widths() {
        let g = Geometry::new(7);
        assert_eq!(g.throne(), 24);
        assert_eq!(g.king_squares(), [0, 6, 42, 48]);
        assert_eq!(g.distance_to_edge(24, -7), 3);
        assert!(g.is_special(24) && g.is_special(48) && !g.is_special(1));
    }

    proptest! {
        #[test]
        fn opposite_rays_span_the_board(index in 0usize..121, dir in 0usize..8) {
            let g = Geometry::standard();
            let offset = g.all_directions()[dir];
            let there = g.distance_to_edge(index, offset);
            let back = g.distance_to_edge(index, -offset);
            if offset == 1 || offset == -1 || offset == 11 || offset == -11 {
                prop_assert_eq!(there + back, 10);
            } else {
                prop_assert!(there + back <= 10);
            }
        }

        #[test]
        fn rays_stay_on_board(index in 0usize..121, dir in 0usize..8) {
            let g = Geometry::standard();
            let offset = g.all_directions()[dir];
            let n = g.distance_to_edge(index, offset);
            let last = index as isize + offset * n as isize;
            prop_assert!((0..121).contains(&last));
            prop_assert!(g.neighbor(last as usize, offset).is_none());
        }
    }
}
