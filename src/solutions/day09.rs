use advent_runner::parsing::{parse_input_lines, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

pub(super) const NAME: &str = "Day 9: Mirage Maintenance";

#[solution_runner(name = NAME, parsed = Report, part_one = Day09, part_two = Day09)]
impl super::Calendar2023<9> {}

/*
Input is an oasis report. Each line is the history of one value: space-separated signed readings.

To extrapolate a history, take the differences between neighboring readings, then the differences
of those, until a row is all zeros. Extending the zero row and working back up extends the history.
*/

type Reading = i64;

#[derive(thiserror::Error, Debug)]
#[error("reading difference overflowed")]
struct DifferenceOverflow;

/// The outer edges of a history's rows of differences.
///
/// Only the first and last reading of each row matter for extrapolating in either direction.
#[derive(Debug, PartialEq, Eq)]
struct Pyramid {
    firsts: Vec<Reading>,
    lasts: Vec<Reading>,
}

impl Pyramid {
    fn build(history: &[Reading]) -> Result<Self, DifferenceOverflow> {
        let mut firsts = Vec::new();
        let mut lasts = Vec::new();
        let mut row = history.to_vec();

        while !row.iter().all(|&reading| reading == 0) {
            // a row that is not all zeros has a reading
            firsts.push(row[0]);
            lasts.push(row[row.len() - 1]);
            row = row
                .windows(2)
                .map(|pair| pair[1].checked_sub(pair[0]))
                .collect::<Option<_>>()
                .ok_or(DifferenceOverflow)?;
        }

        Ok(Self { firsts, lasts })
    }

    /// Each row's next reading is its last plus the next reading of the row below.
    fn next(&self) -> Option<Reading> {
        self.lasts.iter().copied().checked_sum()
    }

    /// Each row's previous reading is its first minus the previous reading of the row below.
    fn previous(&self) -> Option<Reading> {
        self.firsts
            .iter()
            .rev()
            .try_fold(0, |below: Reading, &first| first.checked_sub(below))
    }
}

struct Report(Vec<Pyramid>);

impl ParseData for Report {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let pyramids = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let history: Vec<Reading> = line
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;
            Ok(Pyramid::build(&history)?)
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(pyramids))
    }
}

/// Sum an extrapolation over every history.
fn sum_extrapolated<F>(report: &Report, extrapolate: F) -> DynamicResult<Reading>
where
    F: Fn(&Pyramid) -> Option<Reading>,
{
    let values: Vec<Reading> = report
        .0
        .iter()
        .map(extrapolate)
        .collect::<Option<_>>()
        .ok_or("extrapolated reading overflowed")?;
    Ok(values
        .into_iter()
        .checked_sum()
        .ok_or("sum of readings overflowed")?)
}

/*
For part 1, sum the next reading of every history.
*/

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = Report;
    type Output = Reading;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_extrapolated(input, Pyramid::next)
    }
}

/*
For part 2, extrapolate backwards instead: sum the reading before the first of every history.
*/

impl Solution<PartTwo> for Day09 {
    type Input = Report;
    type Output = Reading;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_extrapolated(input, Pyramid::previous)
    }
}
