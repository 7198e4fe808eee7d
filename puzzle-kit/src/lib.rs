//! Traits and utilities for solving text-input puzzles.
//!
//! A puzzle parses its raw input once, then answers one or more *queries* against the parsed
//! data. Most puzzles are asked the classic two questions ([`Part::One`] and [`Part::Two`]), but a
//! puzzle may define its own query type, such as a tuning parameter that changes the answer.
//!
//! # Quick Start
//!
//! 1. Define your input type and implement [`ParseData`]:
//!
//! ```
//! # use puzzle_kit::{DynamicResult, ParseData};
//! #
//! struct Lines(Vec<String>);
//!
//! impl ParseData for Lines {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         Ok(Self(input.lines().map(String::from).collect()))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Puzzle`], choosing what a query is:
//!
//! ```
//! # use puzzle_kit::{DynamicResult, ParseData, Part, Puzzle};
//! #
//! # struct Lines(Vec<String>);
//! # impl ParseData for Lines {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(String::from).collect()))
//! #     }
//! # }
//! #
//! struct LineCount;
//!
//! impl Puzzle for LineCount {
//!     type Input = Lines;
//!     type Query = Part;
//!     type Output = usize;
//!
//!     fn default_queries() -> Vec<Part> {
//!         vec![Part::One, Part::Two]
//!     }
//!
//!     fn solve(input: &Lines, query: &Part) -> DynamicResult<usize> {
//!         Ok(match query {
//!             Part::One => input.0.len(),
//!             Part::Two => input.0.iter().filter(|line| line.is_empty()).count(),
//!         })
//!     }
//! }
//! ```
//!
//! 3. Use the [`runner`] module to execute your puzzle.
//!
//! # Custom queries
//!
//! Any type that can be displayed and parsed from a string can be a query, so answers can be
//! requested from the command line:
//!
//! ```
//! use std::num::NonZeroU32;
//!
//! use puzzle_kit::{DynamicResult, ParseData, Puzzle};
//!
//! struct Numbers(Vec<u32>);
//!
//! impl ParseData for Numbers {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let values = input
//!             .split_whitespace()
//!             .map(str::parse)
//!             .collect::<Result<Vec<_>, _>>()?;
//!         Ok(Self(values))
//!     }
//! }
//!
//! struct Multiples;
//!
//! impl Puzzle for Multiples {
//!     type Input = Numbers;
//!     type Query = NonZeroU32;
//!     type Output = usize;
//!
//!     fn default_queries() -> Vec<NonZeroU32> {
//!         vec![NonZeroU32::MIN]
//!     }
//!
//!     fn solve(input: &Numbers, divisor: &NonZeroU32) -> DynamicResult<usize> {
//!         Ok(input.0.iter().filter(|n| *n % divisor.get() == 0).count())
//!     }
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

pub mod parsing;
pub mod runner;

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// One of the two questions most puzzles ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A string could not be recognized as a [`Part`].
#[derive(thiserror::Error, Debug)]
#[error("expected a part of \"1\" or \"2\"")]
pub struct ParsePartError;

impl FromStr for Part {
    type Err = ParsePartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" => Ok(Self::One),
            "2" | "two" => Ok(Self::Two),
            _ => Err(ParsePartError),
        }
    }
}

/// A trait for data structures that are created by parsing string input.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

/// A puzzle that answers queries against its parsed input.
pub trait Puzzle {
    /// The parsed input passed to [`Puzzle::solve`].
    type Input: ParseData;

    /// What a single answer is asked for.
    ///
    /// Queries are parsed from strings when overridden by the caller, and displayed to label the
    /// answer.
    type Query: Display + FromStr<Err: Error + Send + Sync + 'static>;

    /// The answer type returned for a query.
    type Output: Display;

    /// The queries answered when the caller doesn't ask for any in particular.
    fn default_queries() -> Vec<Self::Query>;

    /// An optional human-readable report on the parsed input, output before any answers.
    fn summarize(_input: &Self::Input) -> Option<String> {
        None
    }

    /// Answer a query against the parsed input.
    ///
    /// # Errors
    ///
    /// Solving can encounter varying errors, like input that doesn't fit the puzzle's assumptions
    /// or arithmetic overflow.
    /// It is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input, query: &Self::Query) -> DynamicResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_parses_numbers_and_words() -> DynamicResult<()> {
        assert_eq!("1".parse::<Part>()?, Part::One);
        assert_eq!(" two ".parse::<Part>()?, Part::Two);
        assert_eq!("One".parse::<Part>()?, Part::One);
        Ok(())
    }

    #[test]
    fn part_rejects_unknown() {
        assert!("3".parse::<Part>().is_err());
        assert!("".parse::<Part>().is_err());
    }

    #[test]
    fn part_displays_label() {
        assert_eq!(Part::One.to_string(), "Part 1");
        assert_eq!(Part::Two.to_string(), "Part 2");
    }
}
