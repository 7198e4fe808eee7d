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
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use clap::{ArgAction, Parser};
use puzzle_kit::runner::{OutputHandler, RunOptions};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod checked_lcm;
mod solutions;

/// Solver for a collection of text-input puzzles.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's puzzle to run (e.g. 8, 11, etc).
    day: u8,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// A query to answer instead of the puzzle's defaults; repeat for several.
    ///
    /// Two-part puzzles take "1" or "2". Day 11 takes an expansion weight such as "1_000_000".
    #[arg(short, long, value_name = "QUERY")]
    query: Vec<String>,

    /// Measure and print the durations of parsing and solving queries.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,

    /// Log more detail to stderr; repeat for more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Install a subscriber logging to stderr, filtered by `RUST_LOG` or else the verbosity.
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("failed to install log subscriber")
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8) -> Result<String> {
    let filename = format!("day{day:02}.txt");
    let path = PathBuf::from("inputs").join(filename);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        tracing::debug!("parsing input");
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn input_summary(&mut self, summary: &str) {
        println!("{summary}");
    }

    fn query_start(&mut self, query: &dyn Display) {
        println!("-- {query} --");
    }

    fn query_output(
        &mut self,
        _query: &dyn Display,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{output} ({formatted_duration})");
        } else {
            println!("{output}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose)?;

    let input_str = args.input.as_deref().map_or_else(|| get_default_input(args.day), get_input)?;
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    let options = RunOptions {
        queries: &args.query,
        timed: args.timed,
    };
    solutions::run_day(args.day, &input_str, &mut handler, &options).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to run solution")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations_by_scale() {
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_millis(1500)),
            "1.500 seconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_micros(2500)),
            "2.500 milliseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(1500)),
            "1.500 microseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(42)),
            "42 nanoseconds"
        );
    }

    #[test]
    fn filters_short_durations() {
        let handler = CliOutputHandler::new(Duration::from_millis(10));
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_millis(1))),
            None
        );
        assert_eq!(handler.format_optional_duration_above_min(None), None);
        assert!(
            handler
                .format_optional_duration_above_min(Some(Duration::from_millis(20)))
                .is_some()
        );
    }

    #[test]
    fn cli_collects_repeated_queries() {
        let cli = Cli::parse_from(["puzzle-solvers", "11", "-q", "2", "--query", "10", "-vv"]);
        assert_eq!(cli.day, 11);
        assert_eq!(cli.query, vec!["2", "10"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.timed);
    }

    #[test]
    fn runs_galaxy_puzzle_end_to_end() -> Result<()> {
        let input = "#.#\n...\n..#\n";
        let queries = vec!["1".to_string(), "2".to_string()];
        let options = RunOptions {
            queries: &queries,
            timed: false,
        };
        let mut handler = CliOutputHandler::new(Duration::ZERO);
        solutions::run_day(11, input, &mut handler, &options).map_err(Error::from_boxed)?;
        Ok(())
    }

    #[test]
    fn unknown_day_fails() {
        let mut handler = CliOutputHandler::new(Duration::ZERO);
        let result = solutions::run_day(1, "", &mut handler, &RunOptions::default());
        assert!(result.is_err());
    }
}
