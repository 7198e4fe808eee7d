use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use puzzle_kit::parsing::parse_input_lines;
use puzzle_kit::runner::puzzle_runner;
use puzzle_kit::{DynamicResult, ParseData, Part, Puzzle};
use regex::Regex;
use tracing::debug;

use crate::checked_lcm::CheckedLcm;

#[puzzle_runner(name = "Day 8: Haunted Wasteland", puzzle = Day08)]
impl super::Calendar<8> {}

/*
Input is map documents, containing instructions for directions of travel, an empty line, and a
network of labeled nodes.

The directions line is a sequence of `R` and `L` characters, for right and left respectively.

The network of nodes has each line define a start node, `" = "`, and wrapped in `()` a
`", "`-separated pair of nodes. The first node in the pair is reached by traveling left, and the
second right.
*/

/// A direction of travel through the node network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// An error when converting [`char`] to [`Direction`].
#[derive(thiserror::Error, Debug)]
#[error("unrecognized direction character: {0:?}")]
struct DirectionCharError(char);

impl TryFrom<char> for Direction {
    type Error = DirectionCharError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            _ => Err(DirectionCharError(value)),
        }
    }
}

/// A labeled node in the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Node(String);

impl Node {
    fn ends_with(&self, c: char) -> bool {
        self.0.ends_with(c)
    }
}

impl From<&str> for Node {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line didn't follow the `AAA = (BBB, CCC)` node grammar.
#[derive(thiserror::Error, Debug)]
#[error("expected a node connection like \"AAA = (BBB, CCC)\", found {0:?}")]
struct ParseNodeError(String);

/// Parses lines of node connections.
struct ConnectionParser {
    re: Regex,
}

impl ConnectionParser {
    const PATTERN: &str = r"^(\w+) = \((\w+), (\w+)\)$";

    fn new() -> Self {
        let re = Regex::new(Self::PATTERN).expect("pattern should be valid");
        Self { re }
    }

    /// Parse a line into its source node and the pair of left & right connections.
    fn parse(&self, line: &str) -> Result<(Node, (Node, Node)), ParseNodeError> {
        let captures = self
            .re
            .captures(line)
            .ok_or_else(|| ParseNodeError(line.to_string()))?;
        let (_, [source, left, right]) = captures.extract();
        Ok((Node::from(source), (Node::from(left), Node::from(right))))
    }
}

/// The input of map document data, containing a direction sequence and connections of nodes.
#[derive(Debug)]
struct MapDocuments {
    /// A non-empty sequence of directions.
    directions: Vec<Direction>,
    /// A network of labeled nodes as a map, where keys are source nodes and values are pairs of
    /// connected nodes with the first connecting to the left and the second to the right.
    network: HashMap<Node, (Node, Node)>,
}

/// An error parsing [`MapDocuments`] from input.
#[derive(thiserror::Error, Debug)]
enum ParseMapDocumentsError {
    #[error("expected first line for directions")]
    NoDirections,

    #[error("expected lines of node connections for a network, after directions")]
    NoNetwork,
}

impl ParseData for MapDocuments {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = ConnectionParser::new();
        let mut directions_opt: Option<Vec<Direction>> = None;

        let network: HashMap<_, _> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            // the first line with content holds directions, the rest are the network
            if directions_opt.is_none() {
                let directions = line
                    .chars()
                    .map(Direction::try_from)
                    .collect::<Result<_, _>>()?;
                directions_opt = Some(directions);
                return Ok(None);
            }

            Ok(Some(parser.parse(line)?))
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        let directions = directions_opt.ok_or(ParseMapDocumentsError::NoDirections)?;
        if network.is_empty() {
            return Err(ParseMapDocumentsError::NoNetwork.into());
        }

        Ok(Self {
            directions,
            network,
        })
    }
}

/// An error following directions through the network.
#[derive(thiserror::Error, Debug)]
enum TravelError {
    #[error("network has no node {0}")]
    MissingNode(Node),

    #[error("failed to find connections from node {0}")]
    DeadEnd(Node),

    #[error("circular path from node {node} at direction {direction_index} never reaches an end")]
    CircularPath { node: Node, direction_index: usize },

    #[error("no directions to follow")]
    NoDirections,

    #[error("step count overflowed")]
    StepOverflow,

    #[error("network has no start nodes ending in 'A'")]
    NoStartNodes,

    #[error("least common multiple of path lengths overflowed")]
    LcmOverflow,
}

impl MapDocuments {
    /// Count how many steps through directions it takes from a start node to reach a node
    /// satisfying the predicate. The start node itself is checked first.
    ///
    /// # Errors
    ///
    /// A [`TravelError`] if the start node is missing, a node along the way has no connections,
    /// or the path revisits the same node at the same point in the directions.
    fn steps_to<P>(&self, start: &Node, mut is_end: P) -> Result<u64, TravelError>
    where
        P: FnMut(&Node) -> bool,
    {
        let (mut current, _) = self
            .network
            .get_key_value(start)
            .ok_or_else(|| TravelError::MissingNode(start.clone()))?;

        let mut visited = HashSet::new();
        let mut steps: u64 = 0;

        for (direction_index, direction) in self.directions.iter().enumerate().cycle() {
            if is_end(current) {
                return Ok(steps);
            }

            if !visited.insert((current, direction_index)) {
                return Err(TravelError::CircularPath {
                    node: current.clone(),
                    direction_index,
                });
            }

            let (left, right) = self
                .network
                .get(current)
                .ok_or_else(|| TravelError::DeadEnd(current.clone()))?;
            current = match direction {
                Direction::Left => left,
                Direction::Right => right,
            };
            steps = steps.checked_add(1).ok_or(TravelError::StepOverflow)?;
        }

        Err(TravelError::NoDirections)
    }
}

/*
For part 1, follow the directions to travel from node `AAA` to `ZZZ`. The direction sequence can
repeat as many times as necessary.

For part 2, all nodes that end in `A` are start nodes and are traversed simultaneously until all
paths reach nodes that end in `Z`.

> Each path reaches its first end node after some number of steps, then cycles back to an end node
> after that same number of steps again. So the paths line up at the least common multiple of the
> first arrivals.
*/

struct Day08;

impl Day08 {
    fn solve_single_path(input: &MapDocuments) -> Result<u64, TravelError> {
        let end = Node::from("ZZZ");
        input.steps_to(&Node::from("AAA"), |node| *node == end)
    }

    fn solve_simultaneous_paths(input: &MapDocuments) -> Result<u64, TravelError> {
        let mut start_nodes: Vec<&Node> = input
            .network
            .keys()
            .filter(|node| node.ends_with('A'))
            .collect();
        if start_nodes.is_empty() {
            return Err(TravelError::NoStartNodes);
        }
        start_nodes.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let intervals = start_nodes
            .into_iter()
            .map(|start| {
                let steps = input.steps_to(start, |node| node.ends_with('Z'))?;
                debug!(%start, steps, "path reached an end node");
                Ok(steps)
            })
            .collect::<Result<Vec<_>, TravelError>>()?;

        intervals
            .into_iter()
            .checked_lcm()
            .ok_or(TravelError::LcmOverflow)
    }
}

impl Puzzle for Day08 {
    type Input = MapDocuments;
    type Query = Part;
    type Output = u64;

    fn default_queries() -> Vec<Part> {
        vec![Part::One, Part::Two]
    }

    fn solve(input: &MapDocuments, query: &Part) -> DynamicResult<u64> {
        let steps = match query {
            Part::One => Self::solve_single_path(input)?,
            Part::Two => Self::solve_simultaneous_paths(input)?,
        };
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)
";

    const EXAMPLE_INPUT_TWO: &str = r"LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
";

    const EXAMPLE_INPUT_THREE: &str = r"LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        let parsed = MapDocuments::parse(EXAMPLE_INPUT_ONE)?;
        assert_eq!(Day08::solve(&parsed, &Part::One)?, 2);

        let parsed = MapDocuments::parse(EXAMPLE_INPUT_TWO)?;
        assert_eq!(Day08::solve(&parsed, &Part::One)?, 6);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = MapDocuments::parse(EXAMPLE_INPUT_THREE)?;
        assert_eq!(Day08::solve(&parsed, &Part::Two)?, 6);
        Ok(())
    }

    #[test]
    fn parses_documents() -> DynamicResult<()> {
        let parsed = MapDocuments::parse(EXAMPLE_INPUT_TWO)?;
        assert_eq!(
            parsed.directions,
            vec![Direction::Left, Direction::Left, Direction::Right]
        );
        assert_eq!(parsed.network.len(), 3);
        assert_eq!(
            parsed.network.get(&Node::from("BBB")),
            Some(&(Node::from("AAA"), Node::from("ZZZ")))
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(MapDocuments::parse("").is_err());
        assert!(MapDocuments::parse("LR\n").is_err());
        assert!(MapDocuments::parse("LXR\n\nAAA = (BBB, CCC)").is_err());
        assert!(MapDocuments::parse("LR\n\nAAA -> BBB, CCC").is_err());
    }

    #[test]
    fn detects_circular_path() -> DynamicResult<()> {
        let parsed = MapDocuments::parse("LR\n\nAAA = (BBB, BBB)\nBBB = (AAA, AAA)")?;
        let result = Day08::solve_single_path(&parsed);
        assert!(matches!(result, Err(TravelError::CircularPath { .. })));
        Ok(())
    }

    #[test]
    fn detects_dead_end_and_missing_start() -> DynamicResult<()> {
        let parsed = MapDocuments::parse("L\n\nAAA = (BBB, BBB)")?;
        let result = Day08::solve_single_path(&parsed);
        assert!(matches!(result, Err(TravelError::DeadEnd(node)) if node == Node::from("BBB")));

        let parsed = MapDocuments::parse("L\n\nBBB = (ZZZ, ZZZ)")?;
        let result = Day08::solve_single_path(&parsed);
        assert!(matches!(result, Err(TravelError::MissingNode(_))));
        assert!(matches!(
            Day08::solve_simultaneous_paths(&parsed),
            Err(TravelError::NoStartNodes)
        ));
        Ok(())
    }
}
