#![deny(missing_docs)]
//! This crate solves Sudoku puzzles of any dimension `n^2 x n^2` by treating
//! them as constraint satisfaction problems: backtracking search with
//! forward checking, conflict-directed backjumping and
//! minimum-remaining-values variable ordering.

/// The `puzzle` module provides the text format parser and example puzzles.
pub mod puzzle;

/// The `solver` module implements the board model and the search engine.
pub mod solver;
