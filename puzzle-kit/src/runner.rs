//! Functions and traits for running puzzles.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[puzzle_runner]`][puzzle_runner]
//! attribute macro to make a [`Puzzle`] runnable:
//!
//! ```
//! # use puzzle_kit::runner::puzzle_runner;
//! # use puzzle_kit::{DynamicResult, Part, Puzzle};
//! #
//! # struct Lines;
//! # impl puzzle_kit::ParseData for Lines {
//! #     fn parse(_input: &str) -> DynamicResult<Self> {
//! #         Ok(Self)
//! #     }
//! # }
//! #
//! struct Day01;
//!
//! impl Puzzle for Day01 {
//!     type Input = Lines;
//!     type Query = Part;
//!     /* ... */
//! #    type Output = usize;
//! #    fn default_queries() -> Vec<Part> {
//! #        vec![Part::One]
//! #    }
//! #    fn solve(_input: &Lines, _query: &Part) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//!
//! #[puzzle_runner(name = "Day 1", puzzle = Day01)]
//! struct Day01Runner;
//!
//! // or
//!
//! #[puzzle_runner(name = "Day 1", puzzle = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::parsing::parse_with_context;
use crate::{DynamicResult, ParseData, Puzzle};

// re-export procedural macro
pub use puzzle_kit_macros::puzzle_runner;

/// A trait for an output events handler.
///
/// When a puzzle runs, the steps of running it lead to events to output through a handler as
/// feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the puzzle, at the start of running it.
    fn solution_name(&mut self, name: &str);

    /// Called when the puzzle starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called with the puzzle's report on its parsed input, if it has one.
    fn input_summary(&mut self, summary: &str);

    /// Called when solving a query starts, with the query displayed as a label.
    fn query_start(&mut self, query: &dyn Display);

    /// Called when a query is answered to output the result.
    ///
    /// The duration taken to solve is optionally passed.
    fn query_output(
        &mut self,
        query: &dyn Display,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    );
}

/// Options controlling how a puzzle is run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions<'a> {
    /// Queries to answer, as strings to parse into the puzzle's query type.
    ///
    /// When empty, the puzzle's [default queries][Puzzle::default_queries] are answered.
    pub queries: &'a [String],

    /// Measure the time to parse & solve then output the elapsed times to the handler.
    pub timed: bool,
}

/// Measure the duration of an expression.
///
/// The macro evaluates the given expression once and returns a tuple of the expression's result and
/// the elapsed [`Duration`][std::time::Duration].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Evaluate an expression, measuring its duration only if `$timed` is `true`.
///
/// # Returns
///
/// A tuple of the expression's result and `Some` duration when timed, otherwise `None`.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Resolve the queries to answer: parse the requested strings, or fall back to the defaults.
///
/// # Errors
///
/// A requested query string that fails to parse is returned with the string as context.
fn resolve_queries<P: Puzzle>(requested: &[String]) -> DynamicResult<Vec<P::Query>>
where
    <P::Query as FromStr>::Err: 'static,
{
    if requested.is_empty() {
        return Ok(P::default_queries());
    }

    let queries = requested
        .iter()
        .map(|query| parse_with_context::<P::Query>(query))
        .collect::<Result<_, _>>()?;
    Ok(queries)
}

/// Run a puzzle's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Answer a single query, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the puzzle is propagated.
fn run_query<P: Puzzle>(
    input: &P::Input,
    query: &P::Query,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    handler.query_start(query);
    let (result, duration_opt) = measure_with_optional_duration!(P::solve(input, query), timed);
    let output = result?;
    handler.query_output(query, &output, duration_opt);
    Ok(())
}

/// Run a puzzle: parse input once, report its summary, then answer every query in order.
///
/// Requested queries are parsed before the input so a bad query fails without doing any work.
///
/// # Arguments
///
/// - `name` - The puzzle's name to output.
/// - `input` - The input string to solve.
/// - `handler` - The output handler to output events to.
/// - `options` - Which queries to answer and whether to time steps.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing queries, parsing input, or solving is propagated.
/// Queries after a failing one are not answered.
pub fn run_puzzle<P: Puzzle>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: &RunOptions<'_>,
) -> DynamicResult<()>
where
    <P::Query as FromStr>::Err: 'static,
{
    handler.solution_name(name);
    let queries = resolve_queries::<P>(options.queries)?;
    let parsed = run_parse::<P::Input>(input, handler, options.timed)?;

    if let Some(summary) = P::summarize(&parsed) {
        handler.input_summary(&summary);
    }

    for query in &queries {
        run_query::<P>(&parsed, query, handler, options.timed)?;
    }
    Ok(())
}

/// A trait for puzzles that can be run.
///
/// The trait can be implemented with the [`puzzle_runner`] attribute macro.
pub trait PuzzleRunner {
    /// Run the puzzle.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `handler` - The output handler to output events to.
    /// - `options` - Which queries to answer and whether to time steps.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the puzzle is propagated.
    fn run(
        input: &str,
        handler: &mut dyn OutputHandler,
        options: &RunOptions<'_>,
    ) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Part;

    /// Input counting its characters, rejecting `!`.
    struct Chars(usize);

    #[derive(thiserror::Error, Debug)]
    #[error("input contains '!'")]
    struct Bang;

    impl ParseData for Chars {
        fn parse(input: &str) -> DynamicResult<Self> {
            if input.contains('!') {
                return Err(Bang.into());
            }
            Ok(Self(input.chars().count()))
        }
    }

    struct CharCount;

    impl Puzzle for CharCount {
        type Input = Chars;
        type Query = Part;
        type Output = usize;

        fn default_queries() -> Vec<Part> {
            vec![Part::One, Part::Two]
        }

        fn summarize(input: &Chars) -> Option<String> {
            Some(format!("{} characters", input.0))
        }

        fn solve(input: &Chars, query: &Part) -> DynamicResult<usize> {
            Ok(match query {
                Part::One => input.0,
                Part::Two => input.0 * 2,
            })
        }
    }

    /// Records handler events as strings.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl OutputHandler for Recorder {
        fn solution_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_string());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.0.push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn input_summary(&mut self, summary: &str) {
            self.0.push(format!("summary {summary}"));
        }

        fn query_start(&mut self, query: &dyn Display) {
            self.0.push(format!("start {query}"));
        }

        fn query_output(
            &mut self,
            query: &dyn Display,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.0.push(format!("{query} = {output}"));
        }
    }

    #[test]
    fn runs_default_queries_in_order() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        run_puzzle::<CharCount>("Count", "abc", &mut recorder, &RunOptions::default())?;

        assert_eq!(
            recorder.0,
            vec![
                "name Count",
                "parse start",
                "parse end timed=false",
                "summary 3 characters",
                "start Part 1",
                "Part 1 = 3",
                "start Part 2",
                "Part 2 = 6",
            ]
        );
        Ok(())
    }

    #[test]
    fn runs_requested_queries_with_timing() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        let queries = vec!["2".to_string()];
        let options = RunOptions {
            queries: &queries,
            timed: true,
        };
        run_puzzle::<CharCount>("Count", "abcd", &mut recorder, &options)?;

        assert!(recorder.0.contains(&"parse end timed=true".to_string()));
        assert_eq!(recorder.0.last().map(String::as_str), Some("Part 2 = 8"));
        assert!(!recorder.0.contains(&"start Part 1".to_string()));
        Ok(())
    }

    #[test]
    fn bad_query_fails_before_parsing() {
        let mut recorder = Recorder::default();
        let queries = vec!["three".to_string()];
        let options = RunOptions {
            queries: &queries,
            timed: false,
        };
        let result = run_puzzle::<CharCount>("Count", "abc", &mut recorder, &options);

        assert!(result.is_err());
        assert_eq!(recorder.0, vec!["name Count"]);
    }

    #[test]
    fn parse_error_is_propagated() {
        let mut recorder = Recorder::default();
        let result = run_puzzle::<CharCount>("Count", "a!", &mut recorder, &RunOptions::default());

        let Err(error) = result else {
            panic!("input with '!' should fail");
        };
        assert!(error.is::<Bang>());
        assert!(!recorder.0.iter().any(|event| event.starts_with("start")));
    }
}
