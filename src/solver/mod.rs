#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

/// Board representation: cells, domains, conflict sets and consistency
/// checks.
pub mod board;

/// The solver's error taxonomy.
pub mod error;

/// Forward checking: assignment and retraction with conflict recording.
pub mod propagate;

/// Backtracking search with conflict-directed backjumping.
pub mod search;

/// Per-row minimum-remaining-values bookkeeping.
pub mod tracker;
