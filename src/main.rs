//! # cdbj-sudoku
//!
//! `cdbj-sudoku` is a command-line Sudoku solver for boards of any dimension
//! `n^2 x n^2`. Puzzles are solved as constraint satisfaction problems with
//! forward checking, conflict-directed backjumping and
//! minimum-remaining-values variable ordering.
//!
//! ## Usage
//!
//! ```sh
//! cdbj-sudoku [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     it's treated as a path to a puzzle file to be solved.
//!
//!     ```sh
//!     cdbj-sudoku <path_to_puzzle_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a single puzzle file.
//!     ```sh
//!     cdbj-sudoku file --path <path_to_puzzle_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a puzzle provided as plain text.
//!     ```sh
//!     cdbj-sudoku text --input "2 1 0 0 4 0 0 1 0 0 1 0 0 4 0 0 1" [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: Solve every puzzle file in a directory tree.
//!     ```sh
//!     cdbj-sudoku dir --path <path_to_directory> [OPTIONS]
//!     ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `--stats`: Enable printing of statistics (default: `true`).
//! -   `--print-board`: Enable printing of the solved board (default: `true`).
//!
//! ## Puzzle Format
//!
//! Whitespace-separated integers: the block size `n` first, then the
//! `n^2 * n^2` cell values in row-major order, `0` meaning blank.

use cdbj_sudoku::puzzle::parse::{ParseError, parse_puzzle, parse_puzzle_file};
use cdbj_sudoku::solver::board::Board;
use cdbj_sudoku::solver::error::Error;
use cdbj_sudoku::solver::search::{Engine, SearchStats};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "cdbj-sudoku", version, about = "A conflict-directed backjumping Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<String>,

    /// Specifies the subcommand to execute (e.g., `file`, `text`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a single puzzle file.
    File {
        /// Path to the puzzle file. The format is defined by
        /// `puzzle::parse::parse_puzzle_file`.
        #[arg(short, long)]
        path: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Literal puzzle input as a string: the block size followed by the
        /// cell values, whitespace-separated.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file under a directory, recursively.
    Dir {
        /// Path to the directory to walk.
        #[arg(short, long)]
        path: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable printing of performance and search statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the solved board.
    #[arg(long, default_value_t = true)]
    print_board: bool,
}

/// Main entry point: parses command-line arguments and dispatches.
fn main() {
    let cli = Cli::parse();

    // A path without a subcommand defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_file(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let board = parse_puzzle(&input)
                .unwrap_or_else(|e| panic!("Failed to parse puzzle text: {e}"));
            let elapsed = time.elapsed();

            solve_and_report(board, &common, None, elapsed);
        }

        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),

        None => {
            // Reached if no subcommand was provided and `cli.path` was also
            // None; a Some path was handled above.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

/// Parses a puzzle file, solves it and reports the results.
fn solve_file(path: &str, common: &CommonOptions) {
    let time = std::time::Instant::now();
    let board = parse_puzzle_file(path)
        .unwrap_or_else(|e| panic!("Failed to parse file {path}: {e}"));
    let elapsed = time.elapsed();

    solve_and_report(board, common, Some(path), elapsed);
}

/// Walks a directory tree and solves every regular file in it, skipping
/// files that do not parse as puzzles.
fn solve_dir(path: &str, common: &CommonOptions) {
    for entry in WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let file = entry.path();
        let time = std::time::Instant::now();

        match parse_puzzle_file(file) {
            Ok(board) => {
                let elapsed = time.elapsed();
                solve_and_report(board, common, file.to_str(), elapsed);
            }
            Err(ParseError::Io(e)) => {
                eprintln!("Skipping {}: {e}", file.display());
            }
            Err(e) => {
                eprintln!("Skipping {}: not a puzzle file ({e})", file.display());
            }
        }
    }
}

/// Solves a parsed board and reports stats, memory usage and the solution.
fn solve_and_report(
    board: Board,
    common: &CommonOptions,
    label: Option<&str>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        println!("Solving: {name:?}");
    }

    if common.debug {
        println!("Puzzle:\n{board}");
        println!("Dimension: {}", board.size());
        println!("Blanks: {}", board.blank_count());
    }

    // Advance epoch for jemalloc stats, helps isolate memory usage for the
    // solving phase.
    epoch::advance().unwrap();

    let time = std::time::Instant::now();

    let mut engine = Engine::new(board);
    let result = engine.solve();

    let elapsed = time.elapsed();

    if common.debug {
        println!("Result: {result:?}");
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            engine.board(),
            engine.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    match result {
        Ok(()) => {
            if common.print_board {
                println!("Solution:\n{}", engine.board());
            }
            println!("SOLVED");
        }
        Err(Error::Unsolvable) => println!("UNSOLVABLE"),
        Err(e) => panic!("Internal error: {e}"),
    }
}

/// Helper function to print a single statistic line in a formatted table
/// row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &Board,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let size = board.size();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Dimension", format!("{size}x{size}"));
    stat_line("Cells", size * size);

    println!("========================[ Search Statistics ]========================");
    stat_line("Forced assignments", s.forced);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Backjumps", s.backjumps, elapsed_secs);
    stat_line_with_rate("Dead ends", s.dead_ends, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_path() {
        let cli = Cli::parse_from(["cdbj-sudoku", "puzzle.txt"]);
        assert_eq!(cli.path.as_deref(), Some("puzzle.txt"));
        assert!(cli.command.is_none());
        assert!(cli.common.stats);
        assert!(cli.common.print_board);
        assert!(!cli.common.debug);
    }

    #[test]
    fn cli_parses_text_subcommand() {
        let cli = Cli::parse_from(["cdbj-sudoku", "text", "--input", "2 1 0", "--debug"]);
        match cli.command {
            Some(Commands::Text { input, common }) => {
                assert_eq!(input, "2 1 0");
                assert!(common.debug);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
