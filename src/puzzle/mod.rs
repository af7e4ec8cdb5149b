#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

/// Text format parsing for puzzle files.
pub mod parse;

/// A 4x4 puzzle (block size 2) with a unique solution.
pub const EXAMPLE_FOUR: [usize; 16] = [1, 0, 0, 4, 0, 0, 1, 0, 0, 1, 0, 0, 4, 0, 0, 1];

/// A classic 9x9 puzzle (block size 3).
#[rustfmt::skip]
pub const EXAMPLE_NINE: [usize; 81] = [
    5, 3, 0, 0, 7, 0, 0, 0, 0,
    6, 0, 0, 1, 9, 5, 0, 0, 0,
    0, 9, 8, 0, 0, 0, 0, 6, 0,
    8, 0, 0, 0, 6, 0, 0, 0, 3,
    4, 0, 0, 8, 0, 3, 0, 0, 1,
    7, 0, 0, 0, 2, 0, 0, 0, 6,
    0, 6, 0, 0, 0, 0, 2, 8, 0,
    0, 0, 0, 4, 1, 9, 0, 0, 5,
    0, 0, 0, 0, 8, 0, 0, 7, 9,
];
