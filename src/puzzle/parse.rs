#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Whitespace-separated puzzle text format.
//!
//! The first token is the block size `n`; the following `n^2 * n^2` tokens
//! are the cell values in row-major order, with `0` for a blank. Any kind of
//! whitespace separates tokens, so line breaks are purely cosmetic:
//!
//! ```text
//! 2
//! 1 0 0 4
//! 0 0 1 0
//! 0 1 0 0
//! 4 0 0 1
//! ```

use crate::solver::board::Board;
use crate::solver::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

/// Failures while reading a puzzle from text.
#[derive(Debug)]
pub enum ParseError {
    /// The file could not be read.
    Io(io::Error),
    /// A token was not a non-negative integer.
    Token {
        /// The offending token.
        token: String,
    },
    /// The text ended before all cells were given.
    Truncated {
        /// Number of tokens a complete puzzle needs.
        expected: usize,
        /// Number of tokens found.
        found: usize,
    },
    /// The tokens parsed but did not form a valid board.
    Board(Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::Token { token } => write!(f, "invalid puzzle token {token:?}"),
            Self::Truncated { expected, found } => {
                write!(f, "puzzle truncated: expected {expected} tokens, found {found}")
            }
            Self::Board(e) => write!(f, "invalid puzzle: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Board(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<Error> for ParseError {
    fn from(e: Error) -> Self {
        Self::Board(e)
    }
}

/// Parses a board from puzzle text. Tokens beyond the required count are
/// ignored.
///
/// # Errors
///
/// [`ParseError`] on a malformed token, too few tokens, or cell values the
/// board rejects.
pub fn parse_puzzle(input: &str) -> Result<Board, ParseError> {
    let mut tokens = input.split_whitespace();

    let small = next_number(&mut tokens, 1, 0)?;
    let size = small * small;
    let expected = size * size;

    let mut cells = Vec::with_capacity(expected);
    for found in 0..expected {
        cells.push(next_number(&mut tokens, expected + 1, found + 1)?);
    }

    Ok(Board::new(small, &cells)?)
}

/// Reads and parses a puzzle file.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be read, otherwise as
/// [`parse_puzzle`].
pub fn parse_puzzle_file<P: AsRef<Path>>(path: P) -> Result<Board, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_puzzle(&text)
}

fn next_number<'a, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    expected: usize,
    found: usize,
) -> Result<usize, ParseError> {
    let token = tokens
        .next()
        .ok_or(ParseError::Truncated { expected, found })?;
    token.parse().map_err(|_| ParseError::Token {
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::EXAMPLE_FOUR;

    #[test]
    fn parses_a_four_by_four() {
        let text = "2\n1 0 0 4\n0 0 1 0\n0 1 0 0\n4 0 0 1\n";
        let board = parse_puzzle(text).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.values(), EXAMPLE_FOUR);
    }

    #[test]
    fn line_breaks_are_cosmetic() {
        let text = "2 1 0 0 4 0 0 1 0 0 1 0 0 4 0 0 1";
        let board = parse_puzzle(text).unwrap();
        assert_eq!(board.values(), EXAMPLE_FOUR);
    }

    #[test]
    fn rejects_bad_tokens() {
        let err = parse_puzzle("2 1 0 x 4").unwrap_err();
        assert!(matches!(err, ParseError::Token { token } if token == "x"));
    }

    #[test]
    fn rejects_truncated_input() {
        let err = parse_puzzle("2 1 0 0 4").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Truncated {
                expected: 17,
                found: 5
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let text = "2 9 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let err = parse_puzzle(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Board(Error::Value { value: 9, size: 4 })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse_puzzle(""),
            Err(ParseError::Truncated {
                expected: 1,
                found: 0
            })
        ));
    }
}
