use std::num::ParseIntError;
use std::str::FromStr;

use checked_sum::CheckedSum;
use puzzle_kit::parsing::{ParseContextError, parse_input_lines, parse_with_context};
use puzzle_kit::runner::puzzle_runner;
use puzzle_kit::{DynamicResult, ParseData, Part, Puzzle};

#[puzzle_runner(name = "Day 9: Mirage Maintenance", puzzle = Day09)]
impl super::Calendar<9> {}

/*
Input is a report of measurements changing over time. Each line is a history of a value, separating
readings with spaces. Readings are signed.

Extrapolation works on layers of differences: each layer holds the differences between neighboring
values of the layer above, until a layer is all zeros.

For part 1, predict the value after the last reading of each history and return the sum. Each layer
extends by its last value plus the extension of the layer below.

For part 2, predict the value before the first reading instead. Each layer extends backwards by its
first value minus the backwards extension of the layer below.
*/

/// A history of readings of a value.
#[derive(Debug)]
struct History(Vec<i64>);

#[derive(thiserror::Error, Debug)]
enum ParseHistoryError {
    #[error("failed to parse a history value")]
    ParseInt(#[from] ParseContextError<ParseIntError>),
}

impl FromStr for History {
    type Err = ParseHistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(parse_with_context)
            .collect::<Result<_, _>>()?;
        Ok(Self(values))
    }
}

/// Readings or their differences overflowed an `i64`.
#[derive(thiserror::Error, Debug)]
#[error("history values overflowed while extrapolating")]
struct ExtrapolationOverflow;

/// The layers of differences of a history, from the readings down to the last layer that isn't all
/// zeros. Every layer is non-empty.
struct DifferenceLayers(Vec<Vec<i64>>);

impl DifferenceLayers {
    fn extrapolate<F>(&self, mut extend: F) -> Result<i64, ExtrapolationOverflow>
    where
        F: FnMut(&[i64], i64) -> Option<i64>,
    {
        self.0
            .iter()
            .rev()
            .try_fold(0, |below, layer| extend(layer, below))
            .ok_or(ExtrapolationOverflow)
    }

    fn next_value(&self) -> Result<i64, ExtrapolationOverflow> {
        self.extrapolate(|layer, below| layer.last()?.checked_add(below))
    }

    fn previous_value(&self) -> Result<i64, ExtrapolationOverflow> {
        self.extrapolate(|layer, below| layer.first()?.checked_sub(below))
    }
}

impl History {
    fn difference_layers(&self) -> Result<DifferenceLayers, ExtrapolationOverflow> {
        let mut layers = Vec::new();
        let mut layer = self.0.clone();

        // an empty layer has nothing left to extrapolate, same as all zeros
        while !layer.iter().all(|value| *value == 0) {
            let differences = layer
                .windows(2)
                .map(|pair| pair[1].checked_sub(pair[0]))
                .collect::<Option<Vec<_>>>()
                .ok_or(ExtrapolationOverflow)?;
            layers.push(layer);
            layer = differences;
        }

        Ok(DifferenceLayers(layers))
    }
}

struct Measurements(Vec<History>);

impl ParseData for Measurements {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let measurements = parse_input_lines(input, |_, line| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                line.parse().map(Some)
            }
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;
        Ok(Self(measurements))
    }
}

struct Day09;

impl Puzzle for Day09 {
    type Input = Measurements;
    type Query = Part;
    type Output = i64;

    fn default_queries() -> Vec<Part> {
        vec![Part::One, Part::Two]
    }

    fn solve(input: &Measurements, query: &Part) -> DynamicResult<i64> {
        let predictions = input
            .0
            .iter()
            .map(|history| {
                let layers = history.difference_layers()?;
                match query {
                    Part::One => layers.next_value(),
                    Part::Two => layers.previous_value(),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sum = predictions
            .into_iter()
            .checked_sum()
            .ok_or(ExtrapolationOverflow)?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Measurements::parse(EXAMPLE_INPUT)?;
        assert_eq!(Day09::solve(&parsed, &Part::One)?, 114);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Measurements::parse(EXAMPLE_INPUT)?;
        assert_eq!(Day09::solve(&parsed, &Part::Two)?, 2);
        Ok(())
    }

    #[test]
    fn extrapolates_each_history() -> DynamicResult<()> {
        let history: History = "10 13 16 21 30 45".parse()?;
        let layers = history.difference_layers()?;
        assert_eq!(layers.0.len(), 4);
        assert_eq!(layers.next_value()?, 68);
        assert_eq!(layers.previous_value()?, 5);
        Ok(())
    }

    #[test]
    fn handles_negative_and_constant_histories() -> DynamicResult<()> {
        let history: History = "-4 -4 -4".parse()?;
        let layers = history.difference_layers()?;
        assert_eq!(layers.next_value()?, -4);
        assert_eq!(layers.previous_value()?, -4);

        let history: History = "0 0 0".parse()?;
        let layers = history.difference_layers()?;
        assert!(layers.0.is_empty());
        assert_eq!(layers.next_value()?, 0);

        let history: History = "7".parse()?;
        assert_eq!(history.difference_layers()?.next_value()?, 7);
        Ok(())
    }

    #[test]
    fn reports_overflow() -> DynamicResult<()> {
        let history: History = format!("{} {}", i64::MIN, i64::MAX).parse()?;
        assert!(history.difference_layers().is_err());
        Ok(())
    }

    #[test]
    fn skips_blank_lines_and_rejects_bad_numbers() -> DynamicResult<()> {
        let parsed = Measurements::parse("1 2 3\n\n4 5 6\n\n")?;
        assert_eq!(parsed.0.len(), 2);

        assert!(Measurements::parse("1 2 three").is_err());
        Ok(())
    }
}
