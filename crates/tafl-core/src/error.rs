//! Errors surfaced by board queries.

use crate::Color;
use thiserror::Error;

/// Recoverable errors reported by geometry, codec, and rules queries.
///
/// None of these abort the process; the caller decides whether to resign,
/// pass, or report.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaflError {
    #[error("cell index {index} is outside the board (0..{len})")]
    InvalidIndex { index: i64, len: usize },

    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),

    #[error("cell {index} holds malformed value {value}")]
    MalformedBoard { index: usize, value: i32 },

    #[error("unsupported board width {0}")]
    InvalidWidth(u8),
}

impl TaflError {
    /// Builds an [`TaflError::InvalidIndex`] from any integer index.
    pub fn invalid_index(index: impl Into<i64>, len: usize) -> Self {
        TaflError::InvalidIndex {
            index: index.into(),
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TaflError::invalid_index(121, 121);
        assert!(format!("{}", err).contains("121"));

        let err = TaflError::NoLegalMoves(Color::Black);
        assert_eq!(format!("{}", err), "Black has no legal moves");

        let err = TaflError::MalformedBoard {
            index: 7,
            value: 24,
        };
        let msg = format!("{}", err);
        assert!(msg.contains('7') && msg.contains("24"));

        let err = TaflError::InvalidWidth(2);
        assert_eq!(format!("{}", err), "unsupported board width 2");
    }
}
