#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Depth-first search with forward checking, conflict-directed backjumping
//! and minimum-remaining-values variable ordering.
//!
//! The engine first applies every forced assignment (cells whose domain has
//! shrunk to a single value), then branches. Variable selection scans the
//! per-row tracker for the globally smallest domain; an empty tracked domain
//! is a dead end, and its conflict set is merged into a cumulative conflict
//! set shared by the whole search. On a failed branch the engine retracts
//! the trial value and consults the cumulative set: if this cell's tried
//! value is implicated it moves on to a sibling value, otherwise it returns
//! failure immediately, jumping past every decision point that played no
//! part in the conflict.

use crate::solver::board::Board;
use crate::solver::error::Error;
use crate::solver::propagate::Propagator;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Counters describing one solve session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells filled by the forced-assignment pass, before any branching.
    pub forced: usize,
    /// Trial assignments made by the search.
    pub decisions: usize,
    /// Failed trials whose cell was implicated in the conflict (sibling
    /// value tried next).
    pub backtracks: usize,
    /// Failed trials whose cell was not implicated (control jumped past
    /// this level).
    pub backjumps: usize,
    /// Times variable selection found a cell with an empty domain.
    pub dead_ends: usize,
}

/// A solve session: exclusively owns the board, the propagator and the
/// statistics for one run.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    propagator: Propagator,
    stats: SearchStats,
}

impl Engine {
    /// Creates an engine for the given board. Nothing is computed until
    /// [`Engine::solve`] or [`Engine::propagate_singles`] runs.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            propagator: Propagator::new(size),
            stats: SearchStats::default(),
        }
    }

    /// The board in its current state.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the engine, returning the board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Counters for the most recent solve.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Returns `true` iff the board is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Attempts to solve the board in place.
    ///
    /// An already-solved board succeeds trivially, without modification. A
    /// full but inconsistent board, a duplicate in the initial placement, an
    /// emptied domain during forced assignment and an exhausted search all
    /// report [`Error::Unsolvable`]. On success the board is fully solved;
    /// there is no partial result.
    ///
    /// # Errors
    ///
    /// [`Error::Unsolvable`] as described above.
    pub fn solve(&mut self) -> Result<(), Error> {
        if self.board.is_solved() {
            return Ok(());
        }
        if self.board.blank_count() == 0 {
            return Err(Error::Unsolvable);
        }

        self.pre_check()?;
        self.propagate_singles()?;

        if self.board.is_solved() {
            return Ok(());
        }

        let mut cumulative = FxHashMap::default();
        if self.search(&mut cumulative, 0)? {
            Ok(())
        } else {
            Err(Error::Unsolvable)
        }
    }

    /// Initialises every blank cell's domain and the tracker, then
    /// repeatedly assigns any cell whose domain holds exactly one value,
    /// re-propagating after each fill, until a full sweep finds none.
    ///
    /// Boards solvable by single-candidate elimination alone are completely
    /// solved by this pass, with no branching.
    ///
    /// # Errors
    ///
    /// [`Error::Unsolvable`] if propagation drives any domain to empty.
    pub fn propagate_singles(&mut self) -> Result<(), Error> {
        self.board.update_all_domains();
        self.propagator.rebuild(&self.board);

        let size = self.board.size();
        let mut next = 0;
        while next != size {
            next = 0;
            while next < size {
                if let Some(entry) = self.propagator.tracker().entry(next) {
                    match entry.len {
                        0 => return Err(Error::Unsolvable),
                        1 => {
                            let value = self
                                .board
                                .domain(next, entry.col)?
                                .iter()
                                .copied()
                                .min()
                                .ok_or(Error::Unsolvable)?;
                            self.propagator.assign(&mut self.board, next, entry.col, value)?;
                            self.stats.forced += 1;
                            break;
                        }
                        _ => {}
                    }
                }
                next += 1;
            }
        }
        Ok(())
    }

    /// Duplicate check of the initial placement across every row, column
    /// and block.
    fn pre_check(&self) -> Result<(), Error> {
        for i in 0..self.board.size() {
            if !(self.board.check_row(i)?
                && self.board.check_col(i)?
                && self.board.check_block(i)?)
            {
                return Err(Error::Unsolvable);
            }
        }
        Ok(())
    }

    /// One level of the recursive search. `cumulative` is the conflict
    /// accumulator shared across the whole session; it is merged into, never
    /// reset, so "implicated" checks see exactly the entries contributed by
    /// deeper failed branches.
    ///
    /// Returns `Ok(true)` when the board is full, `Ok(false)` to hand
    /// failure to an ancestor, and `Err(Unsolvable)` when depth 0 exhausts
    /// its candidates.
    fn search(
        &mut self,
        cumulative: &mut FxHashMap<usize, usize>,
        depth: usize,
    ) -> Result<bool, Error> {
        let size = self.board.size();

        let mut best: Option<(usize, usize, usize)> = None;
        for row in 0..size {
            let Some(entry) = self.propagator.tracker().entry(row) else {
                continue;
            };
            if entry.len == 0 {
                // dead end: everything in this cell's conflict set matters
                self.stats.dead_ends += 1;
                let conflicts = self.board.conflict_set(row, entry.col)?;
                cumulative.extend(conflicts.iter().map(|(&k, &v)| (k, v)));
                return Ok(false);
            }
            if best.is_none_or(|(_, _, len)| entry.len < len) {
                best = Some((row, entry.col, entry.len));
            }
        }
        let Some((row, col, _)) = best else {
            // no blank cell is tracked, so there is nothing left to assign
            return Ok(true);
        };

        let key = self.board.key(row, col)?;
        let candidates: SmallVec<[usize; 16]> = self
            .board
            .domain(row, col)?
            .iter()
            .copied()
            .sorted_unstable()
            .collect();

        for value in candidates {
            self.propagator.assign(&mut self.board, row, col, value)?;
            self.stats.decisions += 1;

            // a full board is solved: forward checking never allowed an
            // inconsistent assignment on the way here
            if self.board.blank_count() == 0 {
                return Ok(true);
            }

            if self.search(cumulative, depth + 1)? {
                return Ok(true);
            }

            self.propagator.retract(&mut self.board, row, col)?;

            if cumulative.get(&key) == Some(&value) {
                self.stats.backtracks += 1;
                continue;
            }
            // not implicated in the failure: jump past this level without
            // trying the remaining values
            self.stats.backjumps += 1;
            return Ok(false);
        }

        if depth == 0 {
            return Err(Error::Unsolvable);
        }

        // fully explored: clear this cell from the accumulator and hand its
        // own conflict set to the implicated ancestor
        cumulative.remove(&key);
        let conflicts = self.board.conflict_set(row, col)?;
        cumulative.extend(conflicts.iter().map(|(&k, &v)| (k, v)));
        Ok(false)
    }
}

/// Solves a board, returning the solved board or [`Error::Unsolvable`].
///
/// # Errors
///
/// [`Error::Unsolvable`] when the puzzle admits no solution.
pub fn solve_board(board: Board) -> Result<Board, Error> {
    let mut engine = Engine::new(board);
    engine.solve()?;
    Ok(engine.into_board())
}
