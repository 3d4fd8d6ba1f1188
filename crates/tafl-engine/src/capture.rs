//! Custodian capture resolution.
//!
//! After a piece lands on a cell, every orthogonally adjacent enemy that is
//! flanked on the far side by a piece of the mover's color (or a hostile
//! square) is removed. Each direction is judged independently, and only the
//! mover's own flanks are considered: a piece left flanked by a removal stays.

use crate::Board;
use serde::{Deserialize, Serialize};
use tafl_core::{Piece, TaflError};

/// Capture refinements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureRules {
    /// Empty corners act as a flanking piece against everyone.
    pub hostile_corners: bool,
    /// The throne flanks attackers, and defenders while the king is away.
    pub hostile_throne: bool,
    /// Edge lines pinned from the inside are taken in one move.
    pub shield_wall: bool,
}

impl CaptureRules {
    /// Plain sandwich captures between two pieces.
    pub const PLAIN: CaptureRules = CaptureRules {
        hostile_corners: false,
        hostile_throne: false,
        shield_wall: false,
    };

    /// Hostile corners and throne plus shield walls.
    pub const TAFL: CaptureRules = CaptureRules {
        hostile_corners: true,
        hostile_throne: true,
        shield_wall: true,
    };
}

impl Default for CaptureRules {
    fn default() -> Self {
        CaptureRules::TAFL
    }
}

/// Returns true if `cell` closes a sandwich for `mover`.
fn flanks(board: &Board, cell: usize, mover: Piece, rules: &CaptureRules) -> bool {
    let geometry = board.geometry();
    match board.get(cell) {
        Some(piece) => piece.color == mover.color,
        None => {
            (rules.hostile_corners && geometry.is_king_square(cell))
                || (rules.hostile_throne && cell == geometry.throne())
        }
    }
}

/// Lists the cells captured by the piece standing on `to`, in discovery order
/// and without duplicates. The board is not changed.
///
/// Kings are never taken this way; see [`is_king_captured`].
pub fn find_captures(board: &Board, to: usize, rules: &CaptureRules) -> Vec<usize> {
    let mover = match board.get(to) {
        Some(piece) => piece,
        None => return Vec::new(),
    };
    let geometry = board.geometry();

    let mut captured: Vec<usize> = board
        .neighbor_enemies(to)
        .filter(|&(offset, target)| {
            let removable = board.get(target).is_some_and(|p| !p.is_king());
            removable
                && geometry
                    .neighbor(target, offset)
                    .is_some_and(|beyond| flanks(board, beyond, mover, rules))
        })
        .map(|(_, target)| target)
        .collect();

    if rules.shield_wall {
        for target in shield_wall(board, to, mover, rules) {
            if !captured.contains(&target) {
                captured.push(target);
            }
        }
    }

    captured
}

/// Enemy lines along the edge the mover stands on.
fn shield_wall(board: &Board, to: usize, mover: Piece, rules: &CaptureRules) -> Vec<usize> {
    let geometry = board.geometry();
    let edge = match geometry
        .orthogonal()
        .into_iter()
        .find(|&offset| geometry.distance_to_edge(to, offset) == 0)
    {
        Some(offset) => offset,
        None => return Vec::new(),
    };

    let is_enemy = |cell: usize| board.get(cell).is_some_and(|p| p.color != mover.color);
    let is_friend = |cell: usize| board.get(cell).is_some_and(|p| p.color == mover.color);

    let mut captured = Vec::new();
    for (offset, first) in board.neighbor_enemies(to).filter(|&(o, _)| o != -edge) {
        let mut line = Vec::new();
        let mut cursor = first;
        while is_enemy(cursor)
            && !geometry.is_king_square(cursor)
            && geometry.distance_to_edge(cursor, offset) > 0
        {
            line.push(cursor);
            cursor = geometry.step(cursor, offset, 1);
        }

        let bracketed =
            is_friend(cursor) || (rules.hostile_corners && geometry.is_king_square(cursor));
        let pinned = line.iter().all(|&member| {
            geometry
                .neighbor(member, -edge)
                .is_some_and(|front| is_friend(front))
        });

        if !line.is_empty() && bracketed && pinned {
            captured.extend(
                line.into_iter()
                    .filter(|&member| board.get(member).is_some_and(|p| !p.is_king())),
            );
        }
    }
    captured
}

/// Removes everything the piece on `to` captures and returns the cleared cells.
pub fn resolve_captures(board: &mut Board, to: usize, rules: &CaptureRules) -> Vec<usize> {
    let captured = find_captures(board, to, rules);
    for &cell in &captured {
        board.set(cell, None);
    }
    captured
}

/// Checked variant of [`resolve_captures`].
pub fn try_resolve_captures(
    board: &mut Board,
    to: usize,
    rules: &CaptureRules,
) -> Result<Vec<usize>, TaflError> {
    board.geometry().check_index(to)?;
    Ok(resolve_captures(board, to, rules))
}

/// Returns true if the king on `king` is enclosed on all four sides by
/// attackers, or by the throne when it is hostile. A king on the edge cannot
/// be captured.
pub fn is_king_captured(board: &Board, king: usize, rules: &CaptureRules) -> bool {
    let geometry = board.geometry();
    geometry.orthogonal().into_iter().all(|offset| {
        geometry.neighbor(king, offset).is_some_and(|cell| {
            (rules.hostile_throne && cell == geometry.throne())
                || board.get(cell).is_some_and(|p| !p.color.is_defender())
        })
    })
}
