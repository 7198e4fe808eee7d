//! Utility functions and errors for parsing input.

use std::str::FromStr;

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

impl<E> ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that failed to parse.
    #[must_use]
    pub fn string(&self) -> &str {
        &self.string
    }
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The zero based index of the line that failed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse every line of input with a closure, mapping any line's error into an [`InvalidLine`].
///
/// The closure is passed the zero based line index and the line itself.
/// Blank lines are passed too; skip them in the closure if they carry no meaning.
///
/// # Errors
///
/// If parsing a line fails, an [`InvalidLine`] error is yielded for that line, sourcing the
/// original error.
///
/// # Returns
///
/// An iterator of parsing results for each line.
pub fn parse_input_lines<T, E, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(line_index, line)| {
        parser(line_index, line).map_err(|error| InvalidLine {
            line_index,
            source: error.into(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::num::ParseIntError;

    use super::*;

    #[test]
    fn parse_with_context_keeps_string() {
        let result: Result<u8, ParseContextError<ParseIntError>> = parse_with_context("300");
        let Err(error) = result else {
            panic!("300 should not fit in u8");
        };
        assert_eq!(error.string(), "300");
        assert!(error.source().is_some());
    }

    #[test]
    fn parse_input_lines_reports_one_based_line() {
        let input = "1\n2\nx\n4";
        let results: Result<Vec<u32>, _> =
            parse_input_lines(input, |_, line| line.parse::<u32>()).collect();

        let Err(error) = results else {
            panic!("third line is not a number");
        };
        assert_eq!(error.line_index(), 2);
        assert_eq!(error.to_string(), "failure parsing line 3");
    }

    #[test]
    fn parse_input_lines_passes_indices() -> Result<(), InvalidLine> {
        let indices = parse_input_lines("a\n\nb", |index, line| -> Result<_, DynamicError> {
            Ok((index, line.len()))
        })
        .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(indices, vec![(0, 1), (1, 0), (2, 1)]);
        Ok(())
    }
}
