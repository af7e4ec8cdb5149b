#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Forward checking: the assignment/retraction propagator.
//!
//! Assigning a value removes it from the domain of every blank cell sharing
//! the row, column or block, and records the assigning cell in the conflict
//! set of every cell actually shrunk. Retraction reverses that exactly: a
//! cell regains the value only if this cell's entry is present in its
//! conflict set, so no global domain recomputation is ever needed and the
//! search can read the conflict sets to decide how far to backjump.
//!
//! The propagator also owns the MRV tracker and keeps it in lockstep with
//! every assignment and retraction.

use crate::solver::board::{BLANK, Board};
use crate::solver::error::Error;
use crate::solver::tracker::MrvTracker;
use smallvec::SmallVec;

/// Applies assignments and retractions to a [`Board`], maintaining domains,
/// conflict sets and the per-row MRV tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagator {
    tracker: MrvTracker,
}

impl Propagator {
    /// Creates a propagator for a board of the given dimension.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            tracker: MrvTracker::new(size),
        }
    }

    /// Read access to the tracker, for variable selection.
    #[must_use]
    pub const fn tracker(&self) -> &MrvTracker {
        &self.tracker
    }

    /// Recomputes every row's tracker entry exactly. Call once after the
    /// board's domains have been initialised.
    pub fn rebuild(&mut self, board: &Board) {
        for row in 0..board.size() {
            self.tracker.recompute(board, row);
        }
    }

    /// Assigns `value` to the cell at `(row, col)` and propagates: erases
    /// the value from the domain of every other blank cell in the same row,
    /// column and block, recording this cell in the conflict set of each
    /// cell whose domain actually shrank.
    ///
    /// Column and block sweeps nudge the tracker lazily; the cell's own row
    /// is recomputed exactly afterwards since several of its cells may have
    /// shrunk at once.
    ///
    /// # Errors
    ///
    /// Contract violations only: out-of-range coordinates or value.
    pub fn assign(
        &mut self,
        board: &mut Board,
        row: usize,
        col: usize,
        value: usize,
    ) -> Result<(), Error> {
        board.set(row, col, value)?;

        let size = board.size();

        for i in 0..size {
            if board.value(i, col)? != BLANK {
                continue;
            }
            if board.domain_erase(i, col, value)? {
                board.conflict_insert(i, col, row, col)?;
            }
            let len = board.domain_len(i, col)?;
            self.tracker.note_shrunk(i, col, len);
        }

        for j in 0..size {
            if board.value(row, j)? != BLANK {
                continue;
            }
            if board.domain_erase(row, j, value)? {
                board.conflict_insert(row, j, row, col)?;
            }
        }

        // the block sweep skips the cell's own row and column: those cells
        // were already visited above
        let small = board.small_size();
        let start_row = row - row % small;
        let start_col = col - col % small;
        for i in start_row..start_row + small {
            if i == row {
                continue;
            }
            for j in start_col..start_col + small {
                if j == col {
                    continue;
                }
                if board.value(i, j)? != BLANK {
                    continue;
                }
                if board.domain_erase(i, j, value)? {
                    board.conflict_insert(i, j, row, col)?;
                }
                let len = board.domain_len(i, j)?;
                self.tracker.note_shrunk(i, j, len);
            }
        }

        self.tracker.recompute(board, row);
        Ok(())
    }

    /// Clears the cell at `(row, col)` back to blank, reversing the matching
    /// [`Propagator::assign`]: every cell in the same row, column or block
    /// whose conflict set names this cell regains the retracted value and
    /// drops the conflict entry.
    ///
    /// Tracker entries are recomputed for the cell's own row and for every
    /// row whose tracked cell had its domain restored.
    ///
    /// # Errors
    ///
    /// Contract violations only: out-of-range coordinates.
    pub fn retract(&mut self, board: &mut Board, row: usize, col: usize) -> Result<(), Error> {
        let value = board.value(row, col)?;

        let size = board.size();
        let mut dirty_rows: SmallVec<[usize; 8]> = SmallVec::new();

        for i in 0..size {
            if board.value(i, col)? != BLANK {
                continue;
            }
            if board.conflict_erase(i, col, row, col)? {
                board.domain_insert(i, col, value)?;
                if self.tracker.points_at(i, col) && !dirty_rows.contains(&i) {
                    dirty_rows.push(i);
                }
            }
        }

        for j in 0..size {
            if board.value(row, j)? != BLANK {
                continue;
            }
            if board.conflict_erase(row, j, row, col)? {
                board.domain_insert(row, j, value)?;
            }
        }
        // the whole row was touched, always re-track it
        if !dirty_rows.contains(&row) {
            dirty_rows.push(row);
        }

        let small = board.small_size();
        let start_row = row - row % small;
        let start_col = col - col % small;
        for i in start_row..start_row + small {
            for j in start_col..start_col + small {
                if board.value(i, j)? != BLANK {
                    continue;
                }
                if board.conflict_erase(i, j, row, col)? {
                    board.domain_insert(i, j, value)?;
                    if self.tracker.points_at(i, j) && !dirty_rows.contains(&i) {
                        dirty_rows.push(i);
                    }
                }
            }
        }

        // clear the value before re-tracking so the cell counts as blank
        board.set(row, col, BLANK)?;

        for &r in &dirty_rows {
            self.tracker.recompute(board, r);
        }
        Ok(())
    }
}
