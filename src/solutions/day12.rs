use std::collections::HashMap;

use advent_runner::parsing::{parse_input_lines, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

pub(super) const NAME: &str = "Day 12: Hot Springs";

#[solution_runner(name = NAME, parsed = ConditionRecords, part_one = Day12, part_two = Day12)]
impl super::Calendar2023<12> {}

/*
Input is a list of condition records for rows of springs. Each line shows the springs, operational
(`.`), damaged (`#`), or unknown (`?`), then the sizes of the contiguous groups of damaged springs
in order:

    ???.### 1,1,3
*/

const OPERATIONAL: u8 = b'.';
const DAMAGED: u8 = b'#';
const UNKNOWN: u8 = b'?';

#[derive(thiserror::Error, Debug)]
enum ParseRecordError {
    #[error("expected \"<springs> <group sizes>\"")]
    ExpectedRecord,

    #[error("unknown spring condition {0:?}")]
    UnknownCondition(char),

    #[error("damaged group sizes must be positive")]
    EmptyGroup,
}

#[derive(Debug, Clone)]
struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    /// The record with springs repeated five times joined by unknowns, and groups repeated to
    /// match.
    fn unfolded(&self) -> Self {
        let mut springs = Vec::with_capacity(self.springs.len() * 5 + 4);
        for copy in 0..5 {
            if copy > 0 {
                springs.push(UNKNOWN);
            }
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(5),
        }
    }

    /// Returns `None` if the count overflows.
    fn arrangements(&self) -> Option<u64> {
        ArrangementCounter {
            record: self,
            memo: HashMap::new(),
        }
        .count(0, 0)
    }
}

/// Counts arrangements of damaged springs, remembering the count for each suffix of springs
/// and remaining groups.
struct ArrangementCounter<'a> {
    record: &'a Record,
    memo: HashMap<(usize, usize), u64>,
}

impl ArrangementCounter<'_> {
    /// Arrangements of the springs from `position` on, with the groups from `group` on.
    fn count(&mut self, position: usize, group: usize) -> Option<u64> {
        let record = self.record;
        let (springs, groups) = (&record.springs, &record.groups);

        let Some(&spring) = springs.get(position) else {
            return Some(u64::from(group == groups.len()));
        };
        if let Some(&known) = self.memo.get(&(position, group)) {
            return Some(known);
        }

        let mut total = 0;
        if spring != DAMAGED {
            // spring is operational
            total = self.count(position + 1, group)?;
        }
        if spring != OPERATIONAL {
            // a group starts here, and must end before a spring that is not damaged
            if let Some(&size) = groups.get(group) {
                let end = position + size;
                let fits = end <= springs.len()
                    && !springs[position..end].contains(&OPERATIONAL)
                    && springs.get(end) != Some(&DAMAGED);
                if fits {
                    let rest = self.count((end + 1).min(springs.len()), group + 1)?;
                    total = total.checked_add(rest)?;
                }
            }
        }

        self.memo.insert((position, group), total);
        Some(total)
    }
}

struct ConditionRecords(Vec<Record>);

impl ParseData for ConditionRecords {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let records = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (springs_str, groups_str) = line
                .split_once(' ')
                .ok_or(ParseRecordError::ExpectedRecord)?;

            if let Some(unknown) = springs_str
                .chars()
                .find(|&c| !matches!(c, '.' | '#' | '?'))
            {
                return Err(ParseRecordError::UnknownCondition(unknown).into());
            }
            let groups: Vec<usize> = groups_str
                .trim()
                .split(',')
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;
            if groups.contains(&0) {
                return Err(ParseRecordError::EmptyGroup.into());
            }

            Ok(Record {
                springs: springs_str.as_bytes().to_vec(),
                groups,
            })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(records))
    }
}

/*
For part 1, count the possible arrangements of damaged springs for each row and sum them.
*/

struct Day12;

/// Sum of arrangement counts, failing if any count or the sum overflows.
fn sum_arrangements<I>(counts: I) -> DynamicResult<u64>
where
    I: Iterator<Item = Option<u64>>,
{
    let counts: Vec<u64> = counts
        .collect::<Option<_>>()
        .ok_or("arrangement count overflowed")?;
    Ok(counts
        .into_iter()
        .checked_sum()
        .ok_or("arrangement sum overflowed")?)
}

impl Solution<PartOne> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_arrangements(input.0.iter().map(Record::arrangements))
    }
}

/*
For part 2, the records were folded. Unfold each by repeating its springs five times, joined by
unknown springs, and its group sizes five times, then sum the arrangements again.
*/

impl Solution<PartTwo> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_arrangements(input.0.iter().map(|record| record.unfolded().arrangements()))
    }
}
