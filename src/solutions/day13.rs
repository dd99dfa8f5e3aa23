use advent_runner::parsing::InputScanner;
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

pub(super) const NAME: &str = "Day 13: Point of Incidence";

#[solution_runner(name = NAME, parsed = Patterns, part_one = Day13, part_two = Day13)]
impl super::Calendar2023<13> {}

/*
Input is patterns of ash (`.`) and rocks (`#`), separated by empty lines.

Each pattern has one line of reflection between two rows or two columns. Rows or columns past the
nearer edge have nothing to reflect and are ignored.
*/

/// The most rows or columns a pattern may have; each line is kept as a bitmask.
const MAX_LINE_LENGTH: usize = u64::BITS as usize;

#[derive(thiserror::Error, Debug)]
enum ParsePatternError {
    #[error("unknown tile {0:?}, expected '.' or '#'")]
    UnknownTile(char),

    #[error("row has {found} tiles, expected {expected} like the first row")]
    RaggedRow { expected: usize, found: usize },

    #[error("pattern lines are limited to {MAX_LINE_LENGTH} tiles")]
    TooLarge,
}

/// A pattern with rocks set as bits, once by row and once by column.
#[derive(Debug)]
struct Pattern {
    rows: Vec<u64>,
    columns: Vec<u64>,
}

impl Pattern {
    fn from_rows(rows: &[Vec<bool>]) -> Result<Self, ParsePatternError> {
        let width = rows.first().map_or(0, Vec::len);
        if width > MAX_LINE_LENGTH || rows.len() > MAX_LINE_LENGTH {
            return Err(ParsePatternError::TooLarge);
        }

        let mut row_bits = vec![0u64; rows.len()];
        let mut column_bits = vec![0u64; width];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ParsePatternError::RaggedRow {
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, _) in row.iter().enumerate().filter(|&(_, &rock)| rock) {
                row_bits[y] |= 1 << x;
                column_bits[x] |= 1 << y;
            }
        }

        Ok(Self {
            rows: row_bits,
            columns: column_bits,
        })
    }
}

/// Find a line of reflection between `lines`, returning how many lines come before it.
///
/// The line reflects when the mirrored pairs of lines differ by exactly `smudges` tiles in total.
fn reflection_line(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&line| {
        let mut differences = 0;
        for (before, after) in lines[..line].iter().rev().zip(&lines[line..]) {
            differences += (before ^ after).count_ones();
            if differences > smudges {
                return false;
            }
        }
        differences == smudges
    })
}

struct Patterns(Vec<Pattern>);

impl ParseData for Patterns {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let mut patterns = Vec::new();

        while scanner.skip_empty().is_some() {
            let rows = scanner.collect_sequence(|_, line| -> DynamicResult<Vec<bool>> {
                Ok(line
                    .chars()
                    .map(|tile| match tile {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        other => Err(ParsePatternError::UnknownTile(other)),
                    })
                    .collect::<Result<_, _>>()?)
            })?;
            patterns.push(Pattern::from_rows(&rows)?);
        }

        log::debug!("parsed {} patterns", patterns.len());
        Ok(Self(patterns))
    }
}

#[derive(thiserror::Error, Debug)]
#[error("pattern {} has no line of reflection", .0 + 1)]
struct NoReflection(usize);

/// Sum of reflection notes: columns left of a vertical line, or 100 times rows above a
/// horizontal line.
fn summarize(patterns: &Patterns, smudges: u32) -> DynamicResult<usize> {
    let notes: Vec<usize> = patterns
        .0
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            reflection_line(&pattern.columns, smudges)
                .or_else(|| reflection_line(&pattern.rows, smudges).map(|rows| rows * 100))
                .ok_or(NoReflection(index))
        })
        .collect::<Result<_, _>>()?;
    Ok(notes
        .into_iter()
        .checked_sum()
        .ok_or("summary overflowed")?)
}

/*
For part 1, find the perfect reflection of each pattern and summarize them.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        summarize(input, 0)
    }
}

/*
For part 2, every pattern has exactly one smudge: one tile that is the wrong kind. The new line of
reflection is the one that becomes perfect once the smudge is fixed.
*/

impl Solution<PartTwo> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        summarize(input, 1)
    }
}
