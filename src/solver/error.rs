#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error taxonomy for the solver.
//!
//! Two kinds of failure exist and callers are expected to tell them apart
//! by pattern-matching:
//!
//! 1. [`Error::Unsolvable`] — the puzzle admits no solution. This is an
//!    expected, user-visible outcome: the pre-check found a duplicate in the
//!    initial placement, propagation emptied a domain, or the search
//!    exhausted every branch at the outermost depth.
//! 2. Contract violations (`Coordinate`, `Value`, `BlockIndex`, `CellCount`)
//!    — a caller passed an out-of-range argument. These indicate a
//!    programming error in the caller, never a property of the puzzle, and
//!    are surfaced immediately without any retry.

use std::fmt;

/// Every failure the solver can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The puzzle has no solution (or its initial placement is invalid).
    Unsolvable,

    /// A coordinate outside `[0, size)` was used to address a cell.
    Coordinate {
        /// Offending row index.
        row: usize,
        /// Offending column index.
        col: usize,
        /// Board dimension at the time of the access.
        size: usize,
    },

    /// A cell value outside `[0, size]` was supplied.
    Value {
        /// Offending value.
        value: usize,
        /// Board dimension at the time of the access.
        size: usize,
    },

    /// A block index outside `[0, size)` was supplied to a block check.
    BlockIndex {
        /// Offending block index.
        index: usize,
        /// Board dimension at the time of the access.
        size: usize,
    },

    /// A flat cell slice of the wrong length was given to the board
    /// constructor.
    CellCount {
        /// `size * size` for the requested block size.
        expected: usize,
        /// Length of the slice actually supplied.
        found: usize,
    },
}

impl Error {
    /// Returns `true` for the variants that indicate a programming error in
    /// the caller rather than an unsolvable puzzle.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Unsolvable)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unsolvable => write!(f, "sudoku has no solution / is invalid"),
            Self::Coordinate { row, col, size } => write!(
                f,
                "attempted access of invalid coordinate ({row}, {col}) in a {size}x{size} sudoku"
            ),
            Self::Value { value, size } => write!(
                f,
                "gave invalid, out-of-range value ({value}) to a cell in a {size}x{size} sudoku"
            ),
            Self::BlockIndex { index, size } => write!(
                f,
                "block index {index} out of range in a {size}x{size} sudoku"
            ),
            Self::CellCount { expected, found } => write!(
                f,
                "expected {expected} cell values, found {found}"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_split() {
        assert!(!Error::Unsolvable.is_contract_violation());
        assert!(
            Error::Coordinate {
                row: 4,
                col: 0,
                size: 4
            }
            .is_contract_violation()
        );
        assert!(Error::Value { value: 5, size: 4 }.is_contract_violation());
        assert!(Error::BlockIndex { index: 9, size: 9 }.is_contract_violation());
        assert!(
            Error::CellCount {
                expected: 16,
                found: 15
            }
            .is_contract_violation()
        );
    }

    #[test]
    fn display_carries_context() {
        let msg = Error::Coordinate {
            row: 4,
            col: 0,
            size: 4,
        }
        .to_string();
        assert!(msg.contains("(4, 0)"));
        assert!(msg.contains("4x4"));
    }
}
