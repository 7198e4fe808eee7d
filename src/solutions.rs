//! Puzzle solutions, collected by day.
//!
//! This module provides [`run_day`] to dynamically run a puzzle by its day.
//!
//! Steps to make a puzzle available to run:
//! 1. Make a submodule to hold the puzzle implementation.
//! 2. Have the submodule implement [`Calendar<DAY>`] for its day as a [`PuzzleRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`Calendar<DAY>`] for a day, below `MATCH SOLUTIONS HERE`:
//!
//! ```ignore
//! // matching for day 8
//! 8 => Calendar::<8>::run(input, handler, options),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use puzzle_kit::DynamicResult;
use puzzle_kit::runner::{OutputHandler, PuzzleRunner, RunOptions};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day08;
mod day09;
mod day11;

/// A structure collecting puzzles by day.
///
/// In a submodule, implement this as a [`PuzzleRunner`] for the day.
///
/// Use [`#[puzzle_runner]`][puzzle_kit::runner::puzzle_runner] for convenience:
///
/// ```ignore
/// // in a submodule "day08.rs"
/// use puzzle_kit::runner::puzzle_runner;
/// use puzzle_kit::Puzzle;
///
/// struct Day08;
/// impl Puzzle for Day08 {
///     /* ... */
/// }
///
/// #[puzzle_runner(name = "Day 8", puzzle = Day08)]
/// impl super::Calendar<8> {}
/// ```
struct Calendar<const DAY: u8>;

/// A puzzle for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a puzzle based on the day.
///
/// # Errors
///
/// If the puzzle for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the puzzle is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: &RunOptions<'_>,
) -> DynamicResult<()> {
    match day {
        // --- MATCH SOLUTIONS HERE ---
        8 => Calendar::<8>::run(input, handler, options),
        9 => Calendar::<9>::run(input, handler, options),
        11 => Calendar::<11>::run(input, handler, options),
        _ => Err(DayNotAvailable(day).into()),
    }
}
