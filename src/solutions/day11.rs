use std::fmt::Display;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

use nalgebra::Point2;
use puzzle_kit::parsing::parse_input_lines;
use puzzle_kit::runner::puzzle_runner;
use puzzle_kit::{DynamicResult, ParseData, Puzzle};
use tracing::debug;

#[puzzle_runner(name = "Day 11: Cosmic Expansion", puzzle = Day11)]
impl super::Calendar<11> {}

/*
Input is an image formatted into a character grid. There are `.` for empty space and `#` to
represent galaxies.

Rows and columns without any galaxy expand: each counts as `weight` rows/columns when measuring how
far apart two galaxies are. The answer is the sum of distances between every pair of galaxies.
*/

/// A position in the unexpanded image, with `x` as the column and `y` as the row.
pub type Position = Point2<usize>;

/// The observatory image as loaded, before empty rows and columns are known.
///
/// Rows are all the same width and there is at least one row.
#[derive(Debug, Clone)]
pub struct GalaxyImage {
    /// Rows of cells, `true` where a galaxy is.
    rows: Vec<Vec<bool>>,
    width: usize,
}

/// An error when parsing input into [`GalaxyImage`].
#[derive(thiserror::Error, Debug)]
pub enum ParseGalaxyImageError {
    #[error("image has no rows")]
    Empty,

    #[error("unexpected character in image: {0:?}")]
    UnexpectedChar(char),

    #[error("row is {found} characters wide, expected {expected} like the first row")]
    InconsistentWidth { expected: usize, found: usize },
}

impl ParseData for GalaxyImage {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut width_opt: Option<usize> = None;

        let rows: Vec<Vec<bool>> =
            parse_input_lines(input, |_, line| -> Result<_, ParseGalaxyImageError> {
                let line = line.trim_end();
                if line.is_empty() {
                    return Ok(None);
                }

                let row = line
                    .chars()
                    .map(|c| match c {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        _ => Err(ParseGalaxyImageError::UnexpectedChar(c)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                match width_opt {
                    None => width_opt = Some(row.len()),
                    Some(expected) if expected != row.len() => {
                        return Err(ParseGalaxyImageError::InconsistentWidth {
                            expected,
                            found: row.len(),
                        });
                    }
                    Some(_) => {}
                }

                Ok(Some(row))
            })
            .filter_map(Result::transpose)
            .collect::<Result<_, _>>()?;

        let width = width_opt.ok_or(ParseGalaxyImageError::Empty)?;
        Ok(Self { rows, width })
    }
}

impl GalaxyImage {
    /// The number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Positions of all galaxies, in row-major order.
    pub fn markers(&self) -> Vec<Position> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, is_galaxy)| **is_galaxy)
                    .map(move |(x, _)| Position::new(x, y))
            })
            .collect()
    }

    /// Find the rows and columns without galaxies, producing a map that can measure distances.
    ///
    /// The scan happens once here; the resulting map never rescans the image.
    pub fn scan_empty_lines(self) -> DistanceMap {
        let empty_rows: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.contains(&true))
            .map(|(y, _)| y)
            .collect();
        let empty_columns: Vec<usize> = (0..self.width())
            .filter(|&x| self.rows.iter().all(|row| !row[x]))
            .collect();

        debug!(
            width = self.width(),
            height = self.height(),
            empty_rows = empty_rows.len(),
            empty_columns = empty_columns.len(),
            "scanned galaxy image"
        );

        DistanceMap {
            image: self,
            empty_rows,
            empty_columns,
            weight: ExpansionWeight::UNEXPANDED,
        }
    }
}

/// How many rows or columns each empty row or column counts as.
///
/// Always at least 1, which means no expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWeight(NonZeroU64);

impl ExpansionWeight {
    /// Empty rows and columns count as a single row or column.
    pub const UNEXPANDED: Self = Self(NonZeroU64::MIN);

    /// Create a weight, returning `None` for zero.
    pub fn new(weight: u64) -> Option<Self> {
        NonZeroU64::new(weight).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The distance added for crossing an empty row or column, beyond its own single step.
    fn extra(self) -> u64 {
        self.get() - 1
    }
}

impl Display for ExpansionWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expansion weight {}", self.0)
    }
}

/// An error parsing an [`ExpansionWeight`] from a string.
#[derive(thiserror::Error, Debug)]
pub enum ParseExpansionWeightError {
    #[error("expected a whole number")]
    ParseInt(#[from] ParseIntError),

    #[error("weight must be at least 1")]
    Zero,
}

impl FromStr for ExpansionWeight {
    type Err = ParseExpansionWeightError;

    /// Parses a positive integer, allowing `_` or `,` digit separators like `1_000_000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().filter(|c| !matches!(c, '_' | ',')).collect();
        let weight: u64 = digits.parse()?;
        Self::new(weight).ok_or(ParseExpansionWeightError::Zero)
    }
}

/// A galaxy image with its empty rows and columns found, measuring weighted distances between
/// galaxies without building an expanded image.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    image: GalaxyImage,

    /// Rows/y-coordinates that do not contain galaxies.
    ///
    /// Tracked in an ascending sequence.
    empty_rows: Vec<usize>,
    /// Columns/x-coordinates that do not contain galaxies.
    ///
    /// Tracked in an ascending sequence.
    empty_columns: Vec<usize>,

    weight: ExpansionWeight,
}

/// The total of distances between galaxies doesn't fit in a `u64`.
#[derive(thiserror::Error, Debug)]
#[error("distance between galaxies overflowed with {weight}")]
pub struct DistanceOverflow {
    weight: ExpansionWeight,
}

impl ParseData for DistanceMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        Ok(GalaxyImage::parse(input)?.scan_empty_lines())
    }
}

/// With a sorted slice of unique indices, count those within the inclusive span between two
/// coordinates given in either order.
fn count_within(sorted_indices: &[usize], a: usize, b: usize) -> usize {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let start = sorted_indices.partition_point(|&index| index < low);
    let end = sorted_indices.partition_point(|&index| index <= high);
    end - start
}

/// Iterate every unordered pair of distinct items once, keeping slice order within a pair.
fn unique_pairs<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(move |(index, &a)| items[index + 1..].iter().map(move |&b| (a, b)))
}

impl DistanceMap {
    pub fn empty_rows(&self) -> &[usize] {
        &self.empty_rows
    }

    pub fn empty_columns(&self) -> &[usize] {
        &self.empty_columns
    }

    pub fn weight(&self) -> ExpansionWeight {
        self.weight
    }

    /// Set the expansion weight used by later distance measurements.
    pub fn set_weight(&mut self, weight: ExpansionWeight) {
        self.weight = weight;
    }

    /// Positions of all galaxies, in row-major order.
    pub fn markers(&self) -> Vec<Position> {
        self.image.markers()
    }

    /// Measure the Manhattan distance between two positions, with every empty row and column
    /// between them expanded by the current weight.
    ///
    /// Returns `None` if the distance overflows a `u64`.
    pub fn distance(&self, a: Position, b: Position) -> Option<u64> {
        let crossings = count_within(&self.empty_rows, a.y, b.y)
            + count_within(&self.empty_columns, a.x, b.x);
        let base = a.x.abs_diff(b.x) + a.y.abs_diff(b.y);

        u64::try_from(crossings)
            .ok()?
            .checked_mul(self.weight.extra())?
            .checked_add(u64::try_from(base).ok()?)
    }

    /// Sum the distances between every unique pair of galaxies at the current weight.
    ///
    /// # Errors
    ///
    /// A [`DistanceOverflow`] if a distance or the sum doesn't fit in a `u64`.
    pub fn pair_distance_sum(&self) -> Result<u64, DistanceOverflow> {
        let markers = self.markers();
        debug!(
            galaxies = markers.len(),
            weight = self.weight().get(),
            "summing distances between galaxy pairs"
        );

        unique_pairs(&markers)
            .try_fold(0_u64, |sum, (a, b)| {
                self.distance(a, b)
                    .and_then(|distance| sum.checked_add(distance))
            })
            .ok_or(DistanceOverflow {
                weight: self.weight,
            })
    }
}

/// Join indices into a comma separated list, or `none`.
fn format_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

struct Day11;

impl Puzzle for Day11 {
    type Input = DistanceMap;
    type Query = ExpansionWeight;
    type Output = u64;

    fn default_queries() -> Vec<ExpansionWeight> {
        [2, 1_000_000]
            .into_iter()
            .filter_map(ExpansionWeight::new)
            .collect()
    }

    fn summarize(input: &DistanceMap) -> Option<String> {
        Some(format!(
            "Empty rows: {}\nEmpty columns: {}",
            format_indices(input.empty_rows()),
            format_indices(input.empty_columns())
        ))
    }

    fn solve(input: &DistanceMap, weight: &ExpansionWeight) -> DynamicResult<u64> {
        let mut map = input.clone();
        map.set_weight(*weight);
        Ok(map.pair_distance_sum()?)
    }
}
