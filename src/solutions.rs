//! Solutions for the 2023 advent calendar.
//!
//! Each day lives in its own submodule, exposes its puzzle title as `NAME`, and implements
//! [`SolutionRunner`] for [`Calendar2023<DAY>`] with
//! [`#[solution_runner]`][advent_runner::runner::solution_runner]:
//!
//! ```ignore
//! pub(super) const NAME: &str = "Day 1: Trebuchet?!";
//!
//! #[solution_runner(name = NAME, part_one = Day01, part_two = Day01)]
//! impl super::Calendar2023<1> {}
//! ```
//!
//! Adding a day means declaring the submodule, then adding a match arm to both [`day_name`] and
//! [`run_day`].

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use advent_runner::DynamicResult;
use advent_runner::day::Day;
use advent_runner::runner::{OutputHandler, SolutionRunner, Timings};
use thiserror::Error;

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;

/// Solutions collected by day; each submodule implements [`SolutionRunner`] for its day.
struct Calendar2023<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(Day);

/// The puzzle title of a day, or `None` if the day has no solution.
pub fn day_name(day: Day) -> Option<&'static str> {
    let name = match day.number() {
        1 => day01::NAME,
        2 => day02::NAME,
        3 => day03::NAME,
        4 => day04::NAME,
        5 => day05::NAME,
        6 => day06::NAME,
        7 => day07::NAME,
        8 => day08::NAME,
        9 => day09::NAME,
        10 => day10::NAME,
        11 => day11::NAME,
        12 => day12::NAME,
        13 => day13::NAME,
        _ => return None,
    };
    Some(name)
}

/// Whether a day has a solution.
pub fn is_available(day: Day) -> bool {
    day_name(day).is_some()
}

/// Every day with a solution, in order.
pub fn available_days() -> impl Iterator<Item = Day> {
    Day::all().filter(|&day| is_available(day))
}

/// Run the solution of a day.
///
/// # Errors
///
/// A [`DayNotAvailable`] error if the day has no solution. Any dynamically dispatched error from
/// running the solution is propagated.
pub fn run_day(day: Day, input: &str, handler: &mut dyn OutputHandler) -> DynamicResult<Timings> {
    match day.number() {
        1 => Calendar2023::<1>::run(input, handler),
        2 => Calendar2023::<2>::run(input, handler),
        3 => Calendar2023::<3>::run(input, handler),
        4 => Calendar2023::<4>::run(input, handler),
        5 => Calendar2023::<5>::run(input, handler),
        6 => Calendar2023::<6>::run(input, handler),
        7 => Calendar2023::<7>::run(input, handler),
        8 => Calendar2023::<8>::run(input, handler),
        9 => Calendar2023::<9>::run(input, handler),
        10 => Calendar2023::<10>::run(input, handler),
        11 => Calendar2023::<11>::run(input, handler),
        12 => Calendar2023::<12>::run(input, handler),
        13 => Calendar2023::<13>::run(input, handler),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use advent_runner::PartKind;

    use super::*;

    /// Collects answers, ignoring every other event.
    #[derive(Default)]
    struct Answers(Vec<String>);

    impl OutputHandler for Answers {
        fn solution_name(&mut self, _name: &str) {}
        fn parse_start(&mut self) {}
        fn parse_end(&mut self, _duration: Duration) {}
        fn part_start(&mut self, _part: PartKind) {}
        fn part_output(&mut self, _part: PartKind, output: &dyn Display, _duration: Duration) {
            self.0.push(output.to_string());
        }
        fn solution_end(&mut self, _timings: &Timings) {}
    }

    #[test]
    fn days_one_to_thirteen_are_available() {
        let numbers: Vec<u8> = available_days().map(Day::number).collect();
        assert_eq!(numbers, (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn run_day_dispatches_to_the_day() -> DynamicResult<()> {
        let mut answers = Answers::default();
        let input = "0 3 6 9 12 15\n1 3 6 10 15 21\n10 13 16 21 30 45\n";
        let timings = run_day(Day::new(9)?, input, &mut answers)?;
        assert_eq!(answers.0, vec!["114", "2"]);
        assert!(timings.parse.is_some());
        Ok(())
    }

    #[test]
    fn run_day_rejects_missing_days() -> DynamicResult<()> {
        let mut answers = Answers::default();
        let error = run_day(Day::new(20)?, "", &mut answers).expect_err("day 20 is missing");
        assert_eq!(error.to_string(), "no solution available for day 20");
        Ok(())
    }
}
