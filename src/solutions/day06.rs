use advent_runner::parsing::{InputScanner, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::checked_math::CheckedProduct;

pub(super) const NAME: &str = "Day 6: Wait For It";

#[solution_runner(name = NAME, parsed = RaceSheet, part_one = Day06, part_two = Day06)]
impl super::Calendar2023<6> {}

/*
Input lists toy boat races: a `Time:` line of race durations in milliseconds, then a `Distance:`
line of the record distance for each race in millimeters. Races pair up by position in the lists.

Holding the boat's button for `h` milliseconds charges it to `h` millimeters per millisecond, which
it keeps for the rest of the race.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn distance(self, hold: u64) -> u128 {
        u128::from(hold) * u128::from(self.time - hold)
    }

    /// How many hold times beat the record.
    ///
    /// Distance rises with the hold time up to half the race then falls symmetrically, so the
    /// smallest winning hold time in the first half gives the count.
    fn ways_to_win(self) -> u64 {
        let record = u128::from(self.record);
        let half = self.time / 2;
        if self.distance(half) <= record {
            return 0;
        }

        let (mut low, mut high) = (0, half);
        while low < high {
            let middle = low + (high - low) / 2;
            if self.distance(middle) > record {
                high = middle;
            } else {
                low = middle + 1;
            }
        }
        self.time - 2 * low + 1
    }
}

struct RaceSheet {
    races: Vec<Race>,
    /// The race read with every line's digits run together.
    combined: Race,
}

#[derive(thiserror::Error, Debug)]
enum ParseRaceError {
    #[error("expected a line starting with {0:?}")]
    ExpectedLine(&'static str),

    #[error("found {times} times but {records} distances")]
    UnequalLists { times: usize, records: usize },
}

/// Parse a labeled line, returning its numbers and its digits as one number.
fn parse_labeled_line(
    scanner: &mut InputScanner,
    label: &'static str,
) -> DynamicResult<(Vec<u64>, u64)> {
    scanner
        .next_item(|_, line| -> DynamicResult<(Vec<u64>, u64)> {
            let list = line
                .strip_prefix(label)
                .ok_or(ParseRaceError::ExpectedLine(label))?;
            let numbers = list
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;
            let digits: String = list.split_whitespace().collect();
            Ok((numbers, parse_with_context(&digits)?))
        })?
        .ok_or_else(|| ParseRaceError::ExpectedLine(label).into())
}

impl ParseData for RaceSheet {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let (times, combined_time) = parse_labeled_line(&mut scanner, "Time:")?;
        let (records, combined_record) = parse_labeled_line(&mut scanner, "Distance:")?;

        if times.len() != records.len() {
            return Err(ParseRaceError::UnequalLists {
                times: times.len(),
                records: records.len(),
            }
            .into());
        }

        let races = times
            .into_iter()
            .zip(records)
            .map(|(time, record)| Race { time, record })
            .collect();
        let combined = Race {
            time: combined_time,
            record: combined_record,
        };
        log::debug!("combined race: {combined:?}");

        Ok(Self { races, combined })
    }
}

/*
For part 1, multiply together the number of ways to beat the record in each race.
*/

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .races
            .iter()
            .map(|race| race.ways_to_win())
            .checked_product()
            .ok_or("product of ways to win overflowed")?)
    }
}

/*
For part 2, the spaces between numbers were bad kerning: each line is a single number. Count the
ways to beat the record of that one long race.
*/

impl Solution<PartTwo> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.combined.ways_to_win())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Time:      7  15   30
Distance:  9  40  200
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = RaceSheet::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 288);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = RaceSheet::parse(EXAMPLE_INPUT)?;
        assert_eq!(
            parsed.combined,
            Race {
                time: 71530,
                record: 940_200
            }
        );
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 71503);
        Ok(())
    }

    #[test]
    fn ways_to_win_matches_counting() {
        for time in 0..40 {
            for record in 0..120 {
                let race = Race { time, record };
                let counted = (0..=time)
                    .filter(|&hold| race.distance(hold) > u128::from(record))
                    .count() as u64;
                assert_eq!(race.ways_to_win(), counted, "{race:?}");
            }
        }
    }

    #[test]
    fn rejects_unequal_lists() {
        assert!(RaceSheet::parse("Time: 1 2\nDistance: 3\n").is_err());
        assert!(RaceSheet::parse("Time: 1 2\n").is_err());
    }
}
