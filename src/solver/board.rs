#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The board: a flat arena of cells with per-cell domains and conflict sets.
//!
//! A board of block size `n` has `size = n * n` rows and columns. Each cell
//! holds an assigned value (`BLANK` when empty), the set of values it could
//! still legally take, and a conflict set recording which other cells'
//! assignments removed values from its domain. Cells never hold references
//! into one another; all cross-cell effects go through the propagator.
//!
//! Every public accessor validates its arguments and reports out-of-range
//! coordinates, values or block indices as contract-violation errors. A
//! correct caller never triggers these.

use crate::solver::error::Error;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Sentinel value of an unassigned cell.
pub const BLANK: usize = 0;

/// One board position: assigned value, remaining domain and the provenance
/// of every domain reduction.
///
/// The domain is meaningful only while the cell is blank; once a value is
/// assigned it is simply left untouched. Conflict-set keys are the flat keys
/// (`row * size + col`) of the assigned cells responsible for at least one
/// elimination, each mapped to the value that cell held when it eliminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Cell {
    value: usize,
    domain: FxHashSet<usize>,
    conflicts: FxHashMap<usize, usize>,
}

/// An `size x size` sudoku board, `size = small * small`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    small: usize,
    size: usize,
    num_blank: usize,
}

impl Board {
    /// Builds a board from its block size and a row-major slice of values,
    /// `BLANK` (0) marking empty cells. Domains and conflict sets start
    /// empty; call [`Board::update_all_domains`] before searching.
    ///
    /// # Errors
    ///
    /// `Error::CellCount` if `values.len() != size * size`, and
    /// `Error::Value` if any value exceeds `size`.
    pub fn new(small: usize, values: &[usize]) -> Result<Self, Error> {
        let size = small * small;
        if values.len() != size * size {
            return Err(Error::CellCount {
                expected: size * size,
                found: values.len(),
            });
        }

        let mut num_blank = 0;
        let mut cells = Vec::with_capacity(size * size);
        for &value in values {
            if value > size {
                return Err(Error::Value { value, size });
            }
            if value == BLANK {
                num_blank += 1;
            }
            cells.push(Cell {
                value,
                ..Cell::default()
            });
        }

        Ok(Self {
            cells,
            small,
            size,
            num_blank,
        })
    }

    /// Board dimension (`small * small`).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Width of one block.
    #[must_use]
    pub const fn small_size(&self) -> usize {
        self.small
    }

    /// Number of cells still blank.
    #[must_use]
    pub const fn blank_count(&self) -> usize {
        self.num_blank
    }

    /// Flat row-major key identifying the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn key(&self, row: usize, col: usize) -> Result<usize, Error> {
        self.guard(row, col)?;
        Ok(row * self.size + col)
    }

    /// Value of the cell at `(row, col)`, `BLANK` if unassigned.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn value(&self, row: usize, col: usize) -> Result<usize, Error> {
        self.guard(row, col)?;
        Ok(self.cells[row * self.size + col].value)
    }

    /// Sets the value of the cell at `(row, col)`, adjusting the blank count
    /// in both directions.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` for an out-of-range index, `Error::Value` for a
    /// value greater than the board dimension.
    pub fn set(&mut self, row: usize, col: usize, value: usize) -> Result<(), Error> {
        self.guard(row, col)?;
        if value > self.size {
            return Err(Error::Value {
                value,
                size: self.size,
            });
        }

        let cell = &mut self.cells[row * self.size + col];
        let original = cell.value;
        cell.value = value;
        if value == BLANK && original != BLANK {
            self.num_blank += 1;
        } else if original == BLANK && value != BLANK {
            self.num_blank -= 1;
        }
        Ok(())
    }

    /// Returns `true` iff `row` contains no duplicate non-blank value.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if `row` is out of range.
    pub fn check_row(&self, row: usize) -> Result<bool, Error> {
        self.guard(row, 0)?;
        Ok(self.scan_row(row))
    }

    /// Returns `true` iff `col` contains no duplicate non-blank value.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if `col` is out of range.
    pub fn check_col(&self, col: usize) -> Result<bool, Error> {
        self.guard(0, col)?;
        Ok(self.scan_col(col))
    }

    /// Returns `true` iff block `index` contains no duplicate non-blank
    /// value. Blocks are numbered row-major: block of `(row, col)` is
    /// `(row / small) * small + (col / small)`.
    ///
    /// # Errors
    ///
    /// `Error::BlockIndex` if `index >= size`.
    pub fn check_block(&self, index: usize) -> Result<bool, Error> {
        if index >= self.size {
            return Err(Error::BlockIndex {
                index,
                size: self.size,
            });
        }
        Ok(self.scan_block(index))
    }

    /// Returns `true` iff the board is full and no row, column or block
    /// contains a duplicate value.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.num_blank == 0
            && (0..self.size)
                .all(|i| self.scan_row(i) && self.scan_col(i) && self.scan_block(i))
    }

    /// Recomputes the domain of the cell at `(row, col)` from scratch by
    /// scanning its row, column and block for assigned values. A no-op for
    /// an assigned cell.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn update_domain(&mut self, row: usize, col: usize) -> Result<(), Error> {
        self.guard(row, col)?;
        self.update_domain_unchecked(row, col);
        Ok(())
    }

    /// Recomputes the domains of all blank cells.
    pub fn update_all_domains(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                self.update_domain_unchecked(row, col);
            }
        }
    }

    /// Inserts `value` into the domain of the cell at `(row, col)`,
    /// returning whether the set actually changed.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` or `Error::Value` for out-of-range arguments.
    pub fn domain_insert(&mut self, row: usize, col: usize, value: usize) -> Result<bool, Error> {
        self.guard(row, col)?;
        if value > self.size {
            return Err(Error::Value {
                value,
                size: self.size,
            });
        }
        Ok(self.cells[row * self.size + col].domain.insert(value))
    }

    /// Erases `value` from the domain of the cell at `(row, col)`,
    /// returning whether the set actually changed.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` or `Error::Value` for out-of-range arguments.
    pub fn domain_erase(&mut self, row: usize, col: usize, value: usize) -> Result<bool, Error> {
        self.guard(row, col)?;
        if value > self.size {
            return Err(Error::Value {
                value,
                size: self.size,
            });
        }
        Ok(self.cells[row * self.size + col].domain.remove(&value))
    }

    /// Remaining domain of the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn domain(&self, row: usize, col: usize) -> Result<&FxHashSet<usize>, Error> {
        self.guard(row, col)?;
        Ok(&self.cells[row * self.size + col].domain)
    }

    /// Size of the domain of the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn domain_len(&self, row: usize, col: usize) -> Result<usize, Error> {
        self.guard(row, col)?;
        Ok(self.cells[row * self.size + col].domain.len())
    }

    /// Records, in the conflict set of the cell at `(row, col)`, that the
    /// cell at `(other_row, other_col)` eliminated a value: the entry maps
    /// the other cell's key to the value it currently holds.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if any index is out of range.
    pub fn conflict_insert(
        &mut self,
        row: usize,
        col: usize,
        other_row: usize,
        other_col: usize,
    ) -> Result<(), Error> {
        self.guard(row, col)?;
        self.guard(other_row, other_col)?;
        let key = other_row * self.size + other_col;
        let value = self.cells[key].value;
        self.cells[row * self.size + col].conflicts.insert(key, value);
        Ok(())
    }

    /// Erases the entry keyed by `(other_row, other_col)` from the conflict
    /// set of the cell at `(row, col)`, returning whether an entry existed.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if any index is out of range.
    pub fn conflict_erase(
        &mut self,
        row: usize,
        col: usize,
        other_row: usize,
        other_col: usize,
    ) -> Result<bool, Error> {
        self.guard(row, col)?;
        self.guard(other_row, other_col)?;
        let key = other_row * self.size + other_col;
        Ok(self.cells[row * self.size + col]
            .conflicts
            .remove(&key)
            .is_some())
    }

    /// Conflict set of the cell at `(row, col)`: eliminating cell key to
    /// eliminated value.
    ///
    /// # Errors
    ///
    /// `Error::Coordinate` if either index is out of range.
    pub fn conflict_set(
        &self,
        row: usize,
        col: usize,
    ) -> Result<&FxHashMap<usize, usize>, Error> {
        self.guard(row, col)?;
        Ok(&self.cells[row * self.size + col].conflicts)
    }

    /// Row-major snapshot of every cell value.
    #[must_use]
    pub fn values(&self) -> Vec<usize> {
        self.cells.iter().map(|c| c.value).collect()
    }

    fn guard(&self, row: usize, col: usize) -> Result<(), Error> {
        if row >= self.size || col >= self.size {
            return Err(Error::Coordinate {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    fn scan_row(&self, row: usize) -> bool {
        let mut seen = FxHashSet::default();
        for col in 0..self.size {
            let value = self.cells[row * self.size + col].value;
            if value != BLANK && !seen.insert(value) {
                return false;
            }
        }
        true
    }

    fn scan_col(&self, col: usize) -> bool {
        let mut seen = FxHashSet::default();
        for row in 0..self.size {
            let value = self.cells[row * self.size + col].value;
            if value != BLANK && !seen.insert(value) {
                return false;
            }
        }
        true
    }

    fn scan_block(&self, index: usize) -> bool {
        let mut seen = FxHashSet::default();
        let start_row = (index / self.small) * self.small;
        let start_col = (index % self.small) * self.small;
        for row in start_row..start_row + self.small {
            for col in start_col..start_col + self.small {
                let value = self.cells[row * self.size + col].value;
                if value != BLANK && !seen.insert(value) {
                    return false;
                }
            }
        }
        true
    }

    fn update_domain_unchecked(&mut self, row: usize, col: usize) {
        if self.cells[row * self.size + col].value != BLANK {
            return;
        }

        let mut domain: FxHashSet<usize> = (1..=self.size).collect();

        for j in 0..self.size {
            domain.remove(&self.cells[row * self.size + j].value);
        }
        for i in 0..self.size {
            domain.remove(&self.cells[i * self.size + col].value);
        }

        let start_row = row - row % self.small;
        let start_col = col - col % self.small;
        for i in start_row..start_row + self.small {
            for j in start_col..start_col + self.small {
                domain.remove(&self.cells[i * self.size + j].value);
            }
        }

        self.cells[row * self.size + col].domain = domain;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spacing = self.size / 10 + 1;
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.cells[row * self.size + col].value;
                write!(f, "{value:<spacing$} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_by_four() -> Board {
        Board::new(2, &[1, 0, 0, 4, 0, 0, 1, 0, 0, 1, 0, 0, 4, 0, 0, 1]).unwrap()
    }

    #[test]
    fn new_counts_blanks() {
        let board = four_by_four();
        assert_eq!(board.size(), 4);
        assert_eq!(board.small_size(), 2);
        assert_eq!(board.blank_count(), 10);
    }

    #[test]
    fn new_rejects_wrong_length() {
        assert_eq!(
            Board::new(2, &[0; 15]),
            Err(Error::CellCount {
                expected: 16,
                found: 15
            })
        );
    }

    #[test]
    fn new_rejects_out_of_range_value() {
        let mut values = [0; 16];
        values[3] = 5;
        assert_eq!(
            Board::new(2, &values),
            Err(Error::Value { value: 5, size: 4 })
        );
    }

    #[test]
    fn out_of_range_coordinate_is_contract_violation() {
        let board = four_by_four();
        let err = board.value(4, 0).unwrap_err();
        assert_eq!(
            err,
            Error::Coordinate {
                row: 4,
                col: 0,
                size: 4
            }
        );
        assert!(err.is_contract_violation());
    }

    #[test]
    fn set_adjusts_blank_count_both_ways() {
        let mut board = four_by_four();
        let blanks = board.blank_count();

        board.set(0, 1, 3).unwrap();
        assert_eq!(board.blank_count(), blanks - 1);

        board.set(0, 1, BLANK).unwrap();
        assert_eq!(board.blank_count(), blanks);

        // re-assigning an assigned cell leaves the count alone
        board.set(0, 0, 2).unwrap();
        assert_eq!(board.blank_count(), blanks);
    }

    #[test]
    fn set_rejects_out_of_range_value() {
        let mut board = four_by_four();
        assert_eq!(
            board.set(0, 0, 5),
            Err(Error::Value { value: 5, size: 4 })
        );
    }

    #[test]
    fn duplicate_detection() {
        let board = Board::new(2, &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(!board.check_row(0).unwrap());
        assert!(board.check_row(1).unwrap());
        assert!(board.check_col(0).unwrap());
        assert!(!board.check_block(0).unwrap());
    }

    #[test]
    fn check_block_rejects_bad_index() {
        let board = four_by_four();
        assert_eq!(
            board.check_block(4),
            Err(Error::BlockIndex { index: 4, size: 4 })
        );
    }

    #[test]
    fn update_domain_scans_row_col_and_block() {
        let mut board = four_by_four();
        board.update_all_domains();

        // (0,1): row has {1,4}, col has {1}, block has {1} -> {2,3}
        let domain = board.domain(0, 1).unwrap();
        assert_eq!(domain.len(), 2);
        assert!(domain.contains(&2) && domain.contains(&3));

        // assigned cells keep an empty, ignored domain
        assert_eq!(board.domain_len(0, 0).unwrap(), 0);
        board.update_domain(0, 0).unwrap();
        assert_eq!(board.domain_len(0, 0).unwrap(), 0);

        // a single-cell recompute matches the full pass
        board.domain_erase(0, 1, 2).unwrap();
        board.update_domain(0, 1).unwrap();
        assert_eq!(board.domain_len(0, 1).unwrap(), 2);
    }

    #[test]
    fn domain_edits_report_changes() {
        let mut board = four_by_four();
        board.update_all_domains();

        assert!(board.domain_erase(0, 1, 2).unwrap());
        assert!(!board.domain_erase(0, 1, 2).unwrap());
        assert!(board.domain_insert(0, 1, 2).unwrap());
        assert!(!board.domain_insert(0, 1, 2).unwrap());
    }

    #[test]
    fn conflict_set_records_provenance() {
        let mut board = four_by_four();
        board.conflict_insert(0, 1, 0, 0).unwrap();

        let key = board.key(0, 0).unwrap();
        assert_eq!(board.conflict_set(0, 1).unwrap().get(&key), Some(&1));

        assert!(board.conflict_erase(0, 1, 0, 0).unwrap());
        assert!(!board.conflict_erase(0, 1, 0, 0).unwrap());
        assert!(board.conflict_set(0, 1).unwrap().is_empty());
    }

    #[test]
    fn is_solved_requires_full_and_consistent() {
        let solved = Board::new(2, &[1, 3, 2, 4, 2, 4, 1, 3, 3, 1, 4, 2, 4, 2, 3, 1]).unwrap();
        assert!(solved.is_solved());

        let full_invalid =
            Board::new(2, &[1, 3, 2, 4, 2, 4, 1, 3, 3, 1, 4, 2, 4, 2, 3, 2]).unwrap();
        assert!(!full_invalid.is_solved());

        assert!(!four_by_four().is_solved());
    }

    #[test]
    fn display_matches_grid() {
        let board = Board::new(2, &[1, 3, 2, 4, 2, 4, 1, 3, 3, 1, 4, 2, 4, 2, 3, 1]).unwrap();
        assert_eq!(board.to_string(), "1 3 2 4 \n2 4 1 3 \n3 1 4 2 \n4 2 3 1 \n");
    }
}
