#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-row minimum-remaining-values bookkeeping.
//!
//! One entry per row points at the blank cell in that row with the smallest
//! known domain, so variable selection never rescans the whole board. An
//! entry is only guaranteed exact right after [`MrvTracker::recompute`];
//! between recomputes the propagator nudges entries with
//! [`MrvTracker::note_shrunk`], which biases toward recently shrunk cells
//! instead of the true row minimum.

use crate::solver::board::{BLANK, Board};

/// Tracked cell of one row: its column and its domain size at the time the
/// entry was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Column of the tracked cell.
    pub col: usize,
    /// Domain size of the tracked cell when last observed.
    pub len: usize,
}

/// One [`Entry`] per row; `None` for a row with no blank cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrvTracker {
    rows: Vec<Option<Entry>>,
}

impl MrvTracker {
    /// Creates a tracker for a board of the given dimension, all rows
    /// untracked.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![None; size],
        }
    }

    /// Current entry for `row`, if any cell in it was blank at the last
    /// recompute.
    #[must_use]
    pub fn entry(&self, row: usize) -> Option<Entry> {
        self.rows.get(row).copied().flatten()
    }

    /// Returns `true` iff the entry for `row` points at column `col`.
    #[must_use]
    pub fn points_at(&self, row: usize, col: usize) -> bool {
        self.entry(row).is_some_and(|e| e.col == col)
    }

    /// Exact full scan of `row`: tracks the blank cell with the smallest
    /// domain, lowest column winning ties, or clears the entry if the row
    /// has no blank cell.
    pub fn recompute(&mut self, board: &Board, row: usize) {
        let mut best: Option<Entry> = None;
        for col in 0..board.size() {
            if board.value(row, col) != Ok(BLANK) {
                continue;
            }
            let len = board.domain_len(row, col).unwrap_or(0);
            if best.is_none_or(|e| len < e.len) {
                best = Some(Entry { col, len });
            }
        }
        self.rows[row] = best;
    }

    /// Lazy update after a domain shrink at `(row, col)`: repoints the entry
    /// whenever the new size is no larger than the tracked one. Not exact,
    /// by design.
    pub fn note_shrunk(&mut self, row: usize, col: usize, len: usize) {
        let tracked = self.rows[row].map_or(usize::MAX, |e| e.len);
        if len <= tracked {
            self.rows[row] = Some(Entry { col, len });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked_board() -> Board {
        let mut board =
            Board::new(2, &[1, 0, 0, 4, 0, 0, 1, 0, 0, 1, 0, 0, 4, 0, 0, 1]).unwrap();
        board.update_all_domains();
        board
    }

    #[test]
    fn recompute_prefers_smallest_then_lowest_column() {
        let board = tracked_board();
        let mut tracker = MrvTracker::new(board.size());
        tracker.recompute(&board, 0);

        // row 0 domains: col1 {2,3}, col2 {2,3} -> tie broken by column
        assert_eq!(tracker.entry(0), Some(Entry { col: 1, len: 2 }));
    }

    #[test]
    fn recompute_clears_full_rows() {
        let board = Board::new(2, &[1, 3, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        let mut tracker = MrvTracker::new(board.size());
        tracker.recompute(&board, 0);
        assert_eq!(tracker.entry(0), None);
        assert!(!tracker.points_at(0, 0));
    }

    #[test]
    fn note_shrunk_repoints_on_ties() {
        let board = tracked_board();
        let mut tracker = MrvTracker::new(board.size());
        tracker.recompute(&board, 0);

        // equal size still moves the entry (the original's <= rule)
        tracker.note_shrunk(0, 2, 2);
        assert_eq!(tracker.entry(0), Some(Entry { col: 2, len: 2 }));

        // larger size does not
        tracker.note_shrunk(0, 1, 3);
        assert_eq!(tracker.entry(0), Some(Entry { col: 2, len: 2 }));

        // an untracked row always accepts
        tracker.note_shrunk(1, 3, 3);
        assert_eq!(tracker.entry(1), Some(Entry { col: 3, len: 3 }));
    }
}
