//! Move generation.
//!
//! Every piece type has a fixed set of directions. Stepping pieces try one
//! cell per direction, sliding pieces walk each ray up to the distance the
//! [`Geometry`](crate::Geometry) reports and stop at the first occupied cell,
//! knights jump.

use crate::geometry::{Jump, Offset};
use crate::Board;
use tafl_core::{Color, Move, Piece, PieceType};

/// How a piece covers its directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    /// One cell per offset.
    Step([Offset; 4]),
    /// Walk each offset until blocked.
    Slide([Offset; 8], usize),
    /// Fixed jumps that ignore blockers.
    Jump([Jump; 8]),
}

/// Configures how destinations are produced.
///
/// The default is the plain chess-like generator: types move by their own
/// pattern, enemy-occupied cells are not destinations, and no square is
/// reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveGenerator {
    /// Enemy-occupied cells are legal destinations (displacement capture).
    pub displacement: bool,
    /// Only the king may stop on or pass over the throne and the corners.
    pub reserve_special_squares: bool,
    /// The king slides like a rook instead of stepping.
    pub sliding_king: bool,
    /// Reserved-square exception: other pieces may cross the empty throne,
    /// though they still cannot stop on it.
    pub pass_through_throne: bool,
}

impl MoveGenerator {
    /// Generator for the Tafl rule set: no displacement, reserved squares, and
    /// a king that slides when `sliding_king` is set.
    pub const fn tafl(sliding_king: bool) -> Self {
        MoveGenerator {
            displacement: false,
            reserve_special_squares: true,
            sliding_king,
            pass_through_throne: false,
        }
    }

    /// Lets non-king pieces slide across the empty throne.
    pub const fn with_throne_passage(self, pass_through_throne: bool) -> Self {
        MoveGenerator {
            pass_through_throne,
            ..self
        }
    }

    fn pattern(&self, board: &Board, kind: PieceType) -> Pattern {
        let geometry = board.geometry();
        let orthogonal = geometry.orthogonal();
        let [a, b, c, d] = orthogonal;
        match kind {
            PieceType::King if self.sliding_king => Pattern::Slide([a, b, c, d, 0, 0, 0, 0], 4),
            PieceType::King | PieceType::Pawn => Pattern::Step(orthogonal),
            PieceType::Knight => Pattern::Jump(geometry.knight_jumps()),
            PieceType::Bishop => {
                let [a, b, c, d] = geometry.diagonal();
                Pattern::Slide([a, b, c, d, 0, 0, 0, 0], 4)
            }
            PieceType::Rook => Pattern::Slide([a, b, c, d, 0, 0, 0, 0], 4),
            PieceType::Queen => Pattern::Slide(geometry.all_directions(), 8),
        }
    }

    /// Lazily enumerates the destinations of the piece on `from`, direction by
    /// direction and nearest first. An empty cell yields nothing.
    pub fn destinations<'a>(&self, board: &'a Board, from: usize) -> Destinations<'a> {
        let mover = board.get(from);
        let pattern = match mover {
            Some(piece) => self.pattern(board, piece.kind),
            None => Pattern::Step([0; 4]),
        };
        Destinations {
            board,
            from,
            mover,
            pattern,
            generator: *self,
            ray: 0,
            step: 0,
        }
    }

    /// Generates every move for `color`.
    pub fn generate(&self, board: &Board, color: Color) -> MoveList {
        let mut list = MoveList::new();
        for (from, _) in board.pieces_of(color) {
            for to in self.destinations(board, from) {
                list.push(Move::new(from, to));
            }
        }
        list
    }

    /// Returns true if `color` has at least one move.
    pub fn has_moves(&self, board: &Board, color: Color) -> bool {
        board
            .pieces_of(color)
            .any(|(from, _)| self.destinations(board, from).next().is_some())
    }
}

/// Iterator over the destinations of one piece.
///
/// Created by [`MoveGenerator::destinations`].
pub struct Destinations<'a> {
    board: &'a Board,
    from: usize,
    mover: Option<Piece>,
    pattern: Pattern,
    generator: MoveGenerator,
    ray: usize,
    step: usize,
}

impl Destinations<'_> {
    fn rays(&self) -> usize {
        match self.pattern {
            Pattern::Step(_) => 4,
            Pattern::Slide(_, n) => n,
            Pattern::Jump(_) => 8,
        }
    }

    fn next_ray(&mut self) {
        self.ray += 1;
        self.step = 0;
    }

    fn reserved(&self, mover: Piece, target: usize) -> bool {
        self.generator.reserve_special_squares
            && !mover.is_king()
            && self.board.geometry().is_special(target)
    }

    /// Decides whether `target` is a destination. Returns `(yield, keep_walking)`.
    fn visit(&self, mover: Piece, target: usize) -> (bool, bool) {
        if self.reserved(mover, target) {
            let crossable = self.generator.pass_through_throne
                && target == self.board.geometry().throne()
                && self.board.get(target).is_none();
            return (false, crossable);
        }
        match self.board.get(target) {
            None => (true, true),
            Some(other) => (self.generator.displacement && mover.is_enemy_of(other), false),
        }
    }
}

impl Iterator for Destinations<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let mover = self.mover?;
        let board = self.board;
        let geometry = board.geometry();

        while self.ray < self.rays() {
            let target = match self.pattern {
                Pattern::Step(offsets) => {
                    let offset = offsets[self.ray];
                    self.next_ray();
                    match geometry.neighbor(self.from, offset) {
                        Some(t) => t,
                        None => continue,
                    }
                }
                Pattern::Jump(jumps) => {
                    let jump = jumps[self.ray];
                    self.next_ray();
                    match geometry.jump_target(self.from, jump) {
                        Some(t) => t,
                        None => continue,
                    }
                }
                Pattern::Slide(offsets, _) => {
                    let offset = offsets[self.ray];
                    self.step += 1;
                    if self.step > geometry.distance_to_edge(self.from, offset) {
                        self.next_ray();
                        continue;
                    }
                    let target = geometry.step(self.from, offset, self.step);
                    let (hit, keep_walking) = self.visit(mover, target);
                    if !keep_walking {
                        self.next_ray();
                    }
                    if hit {
                        return Some(target);
                    }
                    continue;
                }
            };

            if self.visit(mover, target).0 {
                return Some(target);
            }
        }

        None
    }
}

/// A list of moves.
///
/// Tafl positions routinely exceed a hundred moves for the attackers, so the
/// list is heap-backed; callers reuse it through [`MoveList::clear`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns a mutable slice of the moves, e.g. for ordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    /// Returns true if the list contains `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Geometry;
    use tafl_core::Color;

    fn lone(kind: PieceType, at: usize) -> Board {
        let mut board = Board::standard();
        board.set(at, Some(Piece::new(kind, Color::White)));
        board
    }

    fn dests(generator: MoveGenerator, board: &Board, from: usize) -> Vec<usize> {
        generator.destinations(board, from).collect()
    }

    #[test]
    fn knight_from_centre() {
        let board = lone(PieceType::Knight, 60);
        let found = dests(MoveGenerator::default(), &board, 60);
        assert_eq!(found.len(), 8);
        assert!(found.iter().all(|&t| t < 121));
        let mut offsets: Vec<isize> = found.iter().map(|&t| t as isize - 60).collect();
        offsets.sort();
        assert_eq!(offsets, vec![-23, -21, -13, -9, 9, 13, 21, 23]);
    }

    #[test]
    fn knight_ignores_blockers() {
        let mut board = lone(PieceType::Knight, 60);
        for offset in [-11, -1, 1, 11] {
            board.set((60 + offset) as usize, Some(Piece::BLACK_SOLDIER));
        }
        assert_eq!(dests(MoveGenerator::default(), &board, 60).len(), 8);
    }

    #[test]
    fn stepping_pieces() {
        let king = lone(PieceType::King, 60);
        assert_eq!(dests(MoveGenerator::default(), &king, 60), vec![49, 59, 61, 71]);

        let pawn = lone(PieceType::Pawn, 0);
        assert_eq!(dests(MoveGenerator::default(), &pawn, 0), vec![1, 11]);
    }

    #[test]
    fn sliders_on_empty_board() {
        let rook = lone(PieceType::Rook, 60);
        assert_eq!(dests(MoveGenerator::default(), &rook, 60).len(), 20);

        let bishop = lone(PieceType::Bishop, 60);
        assert_eq!(dests(MoveGenerator::default(), &bishop, 60).len(), 20);

        let queen = lone(PieceType::Queen, 60);
        assert_eq!(dests(MoveGenerator::default(), &queen, 60).len(), 40);

        let corner_queen = lone(PieceType::Queen, 0);
        assert_eq!(dests(MoveGenerator::default(), &corner_queen, 0).len(), 30);
    }

    #[test]
    fn direction_then_distance_order() {
        let rook = lone(PieceType::Rook, 0);
        let found = dests(MoveGenerator::default(), &rook, 0);
        let east: Vec<usize> = (1..=10).collect();
        let south: Vec<usize> = (1..=10).map(|r| r * 11).collect();
        assert_eq!(found, [east, south].concat());
    }

    #[test]
    fn slides_stop_at_first_occupied_cell() {
        let mut board = lone(PieceType::Rook, 60);
        board.set(63, Some(Piece::BLACK_SOLDIER));
        board.set(38, Some(Piece::WHITE_SOLDIER));

        let found = dests(MoveGenerator::default(), &board, 60);
        assert!(found.contains(&61) && found.contains(&62));
        assert!(!found.contains(&63) && !found.contains(&64));
        assert!(found.contains(&49));
        assert!(!found.contains(&38) && !found.contains(&27));

        let displacing = MoveGenerator {
            displacement: true,
            ..MoveGenerator::default()
        };
        let found = dests(displacing, &board, 60);
        assert!(found.contains(&63) && !found.contains(&64));
        assert!(!found.contains(&38));
    }

    #[test]
    fn empty_cell_has_no_moves() {
        let board = Board::standard();
        assert_eq!(MoveGenerator::default().destinations(&board, 60).count(), 0);
    }

    #[test]
    fn reserved_squares_block_soldiers() {
        let mut board = Board::standard();
        board.set(5, Some(Piece::BLACK_SOLDIER));
        board.set(55, Some(Piece::BLACK_SOLDIER));

        let tafl = MoveGenerator::tafl(true);
        let along_top = dests(tafl, &board, 5);
        assert!(!along_top.contains(&0) && !along_top.contains(&10));
        assert!(along_top.contains(&1) && along_top.contains(&9));

        // the throne stops the ray: nothing past it on the same row
        let through_throne = dests(tafl, &board, 55);
        assert!(through_throne.contains(&59));
        assert!(!through_throne.contains(&60) && !through_throne.contains(&61));
    }

    #[test]
    fn empty_throne_can_be_crossed() {
        let mut board = Board::standard();
        board.set(55, Some(Piece::BLACK_SOLDIER));
        board.set(49, Some(Piece::WHITE_SOLDIER));

        let passing = MoveGenerator::tafl(true).with_throne_passage(true);
        let across = dests(passing, &board, 55);
        assert!(across.contains(&59) && across.contains(&61) && across.contains(&65));
        assert!(!across.contains(&60));

        // a defender above the throne crosses it downwards
        let down = dests(passing, &board, 49);
        assert!(down.contains(&71) && down.contains(&115));
        assert!(!down.contains(&60));

        // an occupied throne still blocks
        board.set(60, Some(Piece::WHITE_KING));
        let blocked = dests(passing, &board, 55);
        assert!(blocked.contains(&59) && !blocked.contains(&61));
        // the corners never let a ray through
        board.set(5, Some(Piece::BLACK_SOLDIER));
        let along_top = dests(passing, &board, 5);
        assert!(!along_top.contains(&0) && !along_top.contains(&10));
    }

    #[test]
    fn sliding_king_reaches_corner() {
        let mut board = Board::standard();
        board.set(5, Some(Piece::WHITE_KING));
        let found = dests(MoveGenerator::tafl(true), &board, 5);
        assert!(found.contains(&0) && found.contains(&10));
        assert!(found.contains(&115));

        let stepping = dests(MoveGenerator::tafl(false), &board, 5);
        assert_eq!(stepping, vec![4, 6, 16]);
    }

    #[test]
    fn generate_for_color() {
        let mut board = Board::standard();
        board.set(60, Some(Piece::WHITE_SOLDIER));
        board.set(0, Some(Piece::BLACK_SOLDIER));
        let moves = MoveGenerator::default().generate(&board, Color::White);
        assert_eq!(moves.len(), 20);
        assert!(moves.as_slice().iter().all(|m| m.from() == 60));
        assert!(MoveGenerator::default().has_moves(&board, Color::Black));
    }

    #[test]
    fn other_width() {
        let mut board = Board::empty(std::sync::Arc::new(Geometry::new(7)));
        board.set(24, Some(Piece::new(PieceType::Knight, Color::Black)));
        assert_eq!(MoveGenerator::default().destinations(&board, 24).count(), 8);
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::new(60, 61);
        let m2 = Move::new(0, 1);
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(m2));

        list.retain(|m| m.from() == 0);
        assert_eq!(list.as_slice(), &[m2]);
    }
}
