//! Encirclement detection.
//!
//! The defenders lose once no defending group can reach the board edge through
//! empty or defender-occupied cells. Every defending group is filled once from
//! an explicit work-list; the visited set is shared across starting cells, so
//! the answer does not depend on the order in which groups are found.
//!
//! The same fill, started from the king and stopped by defenders, finds exit
//! forts: the king on the edge in a pocket of empty cells that the attackers
//! cannot enter and whose wall they cannot capture.

use crate::Board;
use tafl_core::Color;

/// How far a fill goes once the edge has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Stop the whole sweep at the first edge contact.
    #[default]
    StopAtEdge,
    /// Keep filling every reachable cell.
    Exhaustive,
}

/// Reusable flood-fill state sized to one board.
#[derive(Debug, Clone, Default)]
pub struct EncirclementDetector {
    visited: Vec<bool>,
    stack: Vec<usize>,
    walls: Vec<usize>,
    mode: FillMode,
}

impl EncirclementDetector {
    pub fn new(mode: FillMode) -> Self {
        EncirclementDetector {
            visited: Vec::new(),
            stack: Vec::new(),
            walls: Vec::new(),
            mode,
        }
    }

    fn reset(&mut self, len: usize) {
        self.visited.clear();
        self.visited.resize(len, false);
        self.stack.clear();
    }

    /// Returns true if no defender can reach the edge.
    pub fn all_defenders_surrounded(&mut self, board: &Board) -> bool {
        !self.sweep(board)
    }

    /// Fills from every defender and reports whether the edge was reached.
    fn sweep(&mut self, board: &Board) -> bool {
        self.reset(board.len());
        let geometry = board.geometry();
        let mut edge_reached = false;

        for (start, _) in board.pieces_of(Color::White) {
            if self.visited[start] {
                continue;
            }
            self.visited[start] = true;
            self.stack.push(start);

            while let Some(cell) = self.stack.pop() {
                for offset in geometry.orthogonal() {
                    let next = match geometry.neighbor(cell, offset) {
                        Some(next) => next,
                        None => {
                            edge_reached = true;
                            if self.mode == FillMode::StopAtEdge {
                                return true;
                            }
                            continue;
                        }
                    };
                    let open = board.get(next).map_or(true, |p| p.color != Color::Black);
                    if open && !self.visited[next] {
                        self.visited[next] = true;
                        self.stack.push(next);
                    }
                }
            }
        }

        edge_reached
    }

    /// Returns true if the king on `king` stands on the edge inside an exit
    /// fort.
    ///
    /// The king needs an empty neighbour. The pocket is every cell reachable
    /// from the king without crossing a defender, and must hold no attacker.
    /// A wall defender is exposed when both cells beside it along a row, or
    /// both along a column, are empty and outside the pocket. Exposed
    /// defenders are counted as lost and the pocket grows through them until
    /// the wall holds or an attacker is reached.
    pub fn is_exit_fort(&mut self, board: &Board, king: usize) -> bool {
        let geometry = board.geometry();
        if king >= board.len()
            || !geometry.is_edge(king)
            || !board.get(king).is_some_and(|p| p.is_king())
        {
            return false;
        }
        let has_room = geometry
            .orthogonal()
            .into_iter()
            .filter_map(|offset| geometry.neighbor(king, offset))
            .any(|cell| board.get(cell).is_none());
        if !has_room {
            return false;
        }

        self.reset(board.len());
        self.visited[king] = true;
        self.stack.push(king);

        loop {
            if !self.grow_pocket(board) {
                return false;
            }
            self.collect_walls(board);

            let visited = &self.visited;
            self.walls.retain(|&wall| is_exposed(board, visited, wall));
            if self.walls.is_empty() {
                return true;
            }
            for &wall in &self.walls {
                self.visited[wall] = true;
                self.stack.push(wall);
            }
        }
    }

    /// Fills the pocket from the stack through empty cells. Returns false on
    /// reaching an attacker.
    fn grow_pocket(&mut self, board: &Board) -> bool {
        let geometry = board.geometry();
        while let Some(cell) = self.stack.pop() {
            for offset in geometry.orthogonal() {
                let next = match geometry.neighbor(cell, offset) {
                    Some(next) if !self.visited[next] => next,
                    _ => continue,
                };
                match board.get(next) {
                    None => {
                        self.visited[next] = true;
                        self.stack.push(next);
                    }
                    Some(piece) if piece.color == Color::Black => return false,
                    Some(_) => {}
                }
            }
        }
        true
    }

    /// Lists the defenders bordering the pocket, leaving out those with no
    /// neighbour outside it.
    fn collect_walls(&mut self, board: &Board) {
        let geometry = board.geometry();
        self.walls.clear();
        for cell in 0..board.len() {
            if !self.visited[cell] {
                continue;
            }
            for offset in geometry.orthogonal() {
                let next = match geometry.neighbor(cell, offset) {
                    Some(next) if !self.visited[next] => next,
                    _ => continue,
                };
                if board.get(next).is_some() && !self.walls.contains(&next) {
                    self.walls.push(next);
                }
            }
        }

        let visited = &self.visited;
        self.walls.retain(|&wall| {
            !geometry
                .orthogonal()
                .into_iter()
                .filter_map(|offset| geometry.neighbor(wall, offset))
                .all(|cell| visited[cell])
        });
    }

    /// Cells visited by the last sweep.
    pub fn visited(&self) -> &[bool] {
        &self.visited
    }
}

/// Returns true if the wall piece on `wall` could be sandwiched from outside
/// the pocket.
fn is_exposed(board: &Board, pocket: &[bool], wall: usize) -> bool {
    let geometry = board.geometry();
    let open = |offset| {
        geometry
            .neighbor(wall, offset)
            .is_some_and(|cell| !pocket[cell] && board.get(cell).is_none())
    };
    let [north, west, east, south] = geometry.orthogonal();
    (open(west) && open(east)) || (open(north) && open(south))
}

/// One-shot variant of [`EncirclementDetector::all_defenders_surrounded`].
pub fn all_defenders_surrounded(board: &Board) -> bool {
    EncirclementDetector::default().all_defenders_surrounded(board)
}

/// One-shot variant of [`EncirclementDetector::is_exit_fort`].
pub fn is_exit_fort(board: &Board, king: usize) -> bool {
    EncirclementDetector::default().is_exit_fort(board, king)
}
