use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use advent_runner::parsing::{InputScanner, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::checked_math::checked_lcm;

pub(super) const NAME: &str = "Day 8: Haunted Wasteland";

#[solution_runner(name = NAME, parsed = Documents, part_one = Day08, part_two = Day08)]
impl super::Calendar2023<8> {}

/*
Input is a set of documents: a line of `L`/`R` turn instructions, an empty line, then a network of
nodes. Each node line names a node and the nodes reached by going left and right from it:

    AAA = (BBB, CCC)

Instructions repeat from the start once they run out.
*/

/// A three character node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeLabel([u8; 3]);

impl NodeLabel {
    fn ends_with(self, suffix: u8) -> bool {
        self.0[2] == suffix
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|&byte| write!(f, "{}", char::from(byte)))
    }
}

#[derive(thiserror::Error, Debug)]
#[error("expected three letters or digits as a node label")]
struct ParseLabelError;

impl FromStr for NodeLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 3] = s.as_bytes().try_into().map_err(|_| ParseLabelError)?;
        if bytes.iter().all(u8::is_ascii_alphanumeric) {
            Ok(Self(bytes))
        } else {
            Err(ParseLabelError)
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ParseDocumentsError {
    #[error("expected a line of instructions")]
    NoInstructions,

    #[error("unknown instruction {0:?}, expected 'L' or 'R'")]
    UnknownInstruction(char),

    #[error("expected \"<node> = (<left>, <right>)\"")]
    ExpectedNodeLine,

    #[error("node {0} is defined twice")]
    DuplicateNode(NodeLabel),

    #[error("node {0} is referenced but never defined")]
    UnknownNode(NodeLabel),

    #[error("unexpected lines after the node network")]
    TrailingLines,
}

/// The network, with nodes referring to each other by index.
#[derive(Debug)]
struct Documents {
    /// Per instruction, `0` for left and `1` for right.
    instructions: Vec<usize>,
    labels: Vec<NodeLabel>,
    /// Left and right neighbors of each node.
    links: Vec<[usize; 2]>,
    index_of: HashMap<NodeLabel, usize>,
}

fn parse_node_line(line: &str) -> DynamicResult<(NodeLabel, [NodeLabel; 2])> {
    let (node, neighbors) = line
        .split_once(" = ")
        .ok_or(ParseDocumentsError::ExpectedNodeLine)?;
    let (left, right) = neighbors
        .strip_prefix('(')
        .and_then(|neighbors| neighbors.strip_suffix(')'))
        .and_then(|neighbors| neighbors.split_once(", "))
        .ok_or(ParseDocumentsError::ExpectedNodeLine)?;
    Ok((
        parse_with_context(node)?,
        [parse_with_context(left)?, parse_with_context(right)?],
    ))
}

impl ParseData for Documents {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        let instructions = scanner
            .next_item(|_, line| -> DynamicResult<Vec<usize>> {
                Ok(line
                    .chars()
                    .map(|instruction| match instruction {
                        'L' => Ok(0),
                        'R' => Ok(1),
                        other => Err(ParseDocumentsError::UnknownInstruction(other)),
                    })
                    .collect::<Result<_, _>>()?)
            })?
            .ok_or(ParseDocumentsError::NoInstructions)?;

        scanner.skip_empty();
        let nodes = scanner.collect_sequence(|_, line| parse_node_line(line))?;
        if scanner.skip_empty().is_some() {
            return Err(ParseDocumentsError::TrailingLines.into());
        }

        let mut index_of = HashMap::with_capacity(nodes.len());
        for (index, &(label, _)) in nodes.iter().enumerate() {
            if index_of.insert(label, index).is_some() {
                return Err(ParseDocumentsError::DuplicateNode(label).into());
            }
        }

        let links = nodes
            .iter()
            .map(|(_, neighbors)| {
                let [left, right] = neighbors.map(|label| {
                    index_of
                        .get(&label)
                        .copied()
                        .ok_or(ParseDocumentsError::UnknownNode(label))
                });
                Ok([left?, right?])
            })
            .collect::<Result<_, ParseDocumentsError>>()?;
        let labels = nodes.into_iter().map(|(label, _)| label).collect();

        Ok(Self {
            instructions,
            labels,
            links,
            index_of,
        })
    }
}

#[derive(thiserror::Error, Debug)]
enum WalkError {
    #[error("no instructions to follow")]
    NoInstructions,

    #[error("network has no node {0}")]
    MissingStart(NodeLabel),

    #[error("walk from {0} loops forever without reaching a goal")]
    NeverArrives(NodeLabel),
}

impl Documents {
    /// Count steps from a node until reaching a node accepted by `is_goal`.
    ///
    /// Revisiting a node at the same instruction position means the walk has entered a cycle with
    /// no goal on it.
    fn steps_until<F>(&self, start: NodeLabel, is_goal: F) -> Result<u64, WalkError>
    where
        F: Fn(NodeLabel) -> bool,
    {
        let mut node = *self
            .index_of
            .get(&start)
            .ok_or(WalkError::MissingStart(start))?;

        let mut turns = self.instructions.iter().enumerate().cycle();
        let mut seen = HashSet::new();
        let mut steps = 0;
        loop {
            let Some((position, &turn)) = turns.next() else {
                return Err(WalkError::NoInstructions);
            };
            if !seen.insert((node, position)) {
                return Err(WalkError::NeverArrives(start));
            }
            node = self.links[node][turn];
            steps += 1;
            if is_goal(self.labels[node]) {
                return Ok(steps);
            }
        }
    }
}

/*
For part 1, count the steps following instructions from `AAA` to `ZZZ`.
*/

struct Day08;

const START: NodeLabel = NodeLabel(*b"AAA");
const GOAL: NodeLabel = NodeLabel(*b"ZZZ");

impl Solution<PartOne> for Day08 {
    type Input = Documents;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.steps_until(START, |node| node == GOAL)?)
    }
}

/*
For part 2, start simultaneously on every node ending in `A` and step together until every walk is
on a node ending in `Z`.

Each walk reaches its goal on a cycle of the same length as the walk from its start, so the walks
line up at the least common multiple of their lengths.
*/

impl Solution<PartTwo> for Day08 {
    type Input = Documents;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let lengths = input
            .labels
            .iter()
            .filter(|label| label.ends_with(b'A'))
            .map(|&start| {
                let steps = input.steps_until(start, |node| node.ends_with(b'Z'))?;
                log::debug!("{start} reaches a goal after {steps} steps");
                Ok(steps)
            })
            .collect::<Result<Vec<_>, WalkError>>()?;

        if lengths.is_empty() {
            return Err("network has no nodes ending in 'A'".into());
        }
        Ok(checked_lcm(lengths).ok_or("least common multiple overflowed")?)
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

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        let parsed = Documents::parse(EXAMPLE_INPUT_ONE)?;
        assert_eq!(<Day08 as Solution<PartOne>>::solve(&parsed)?, 2);

        let parsed = Documents::parse(EXAMPLE_INPUT_TWO)?;
        assert_eq!(<Day08 as Solution<PartOne>>::solve(&parsed)?, 6);
        Ok(())
    }

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
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Documents::parse(EXAMPLE_INPUT_THREE)?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn unreachable_goal_is_an_error() -> DynamicResult<()> {
        let parsed = Documents::parse("L\n\nAAA = (BBB, BBB)\nBBB = (AAA, ZZZ)\nZZZ = (ZZZ, ZZZ)\n")?;
        let error = <Day08 as Solution<PartOne>>::solve(&parsed).expect_err("walk never arrives");
        assert_eq!(
            error.to_string(),
            "walk from AAA loops forever without reaching a goal"
        );
        Ok(())
    }

    #[test]
    fn rejects_undefined_nodes() {
        assert!(Documents::parse("L\n\nAAA = (BBB, AAA)\n").is_err());
        assert!(Documents::parse("L\n\nAAA = (AAA, AAA)\nAAA = (AAA, AAA)\n").is_err());
        assert!(Documents::parse("LX\n\nAAA = (AAA, AAA)\n").is_err());
    }

    #[test]
    fn rejects_nodes_after_a_blank_line() -> DynamicResult<()> {
        let error = Documents::parse("L\n\nAAA = (ZZZ, ZZZ)\n\nZZZ = (ZZZ, ZZZ)\n")
            .expect_err("split network");
        assert_eq!(error.to_string(), "unexpected lines after the node network");

        Documents::parse("L\n\nAAA = (ZZZ, ZZZ)\nZZZ = (ZZZ, ZZZ)\n\n\n")?;
        Ok(())
    }
}
