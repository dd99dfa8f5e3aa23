//! Functions and traits for running solutions.
//!
//! Running a day parses its input (when the day has a [`ParseData`] type), then solves part one and
//! part two in order. Every step is timed, and progress is reported as events to an
//! [`OutputHandler`].
//!
//! The [`#[solution_runner]`][solution_runner] attribute implements [`SolutionRunner`] for a type:
//!
//! ```
//! # use advent_runner::runner::solution_runner;
//! # use advent_runner::{DynamicResult, PartOne, PartTwo, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &str) -> DynamicResult<usize> {
//! #        Ok(input.len())
//! #    }
//! }
//! # impl Solution<PartTwo> for Day01 {
//! #    type Input = str;
//! #    type Output = usize;
//! #    fn solve(input: &str) -> DynamicResult<usize> {
//! #        Ok(input.lines().count())
//! #    }
//! # }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use advent_runner_macros::solution_runner;

/// Receives events while a solution runs.
pub trait OutputHandler {
    /// Called with the solution's name before anything else runs.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input finished, with the time it took.
    fn parse_end(&mut self, duration: Duration);

    /// Called when a part starts.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finished, with its answer and the time it took.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Duration);

    /// Called once both parts finished.
    fn solution_end(&mut self, timings: &Timings);
}

/// Elapsed times of the steps of one solution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    /// Time spent parsing, if the solution has a parse step.
    pub parse: Option<Duration>,
    /// Time spent solving part one.
    pub part_one: Duration,
    /// Time spent solving part two.
    pub part_two: Duration,
}

impl Timings {
    /// The sum of all steps.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.parse.unwrap_or_default() + self.part_one + self.part_two
    }
}

/// Evaluate an expression once, returning a tuple of its result and the elapsed [`Duration`].
///
/// Side effects of the expression, such as dropping consumed values, are part of the measured time.
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(input: &S::Input, handler: &mut dyn OutputHandler) -> DynamicResult<Duration>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    handler.part_start(part);
    let (result, duration) = measure_duration!(S::solve(input));
    let output = result?;
    handler.part_output(part, &output, duration);
    Ok(duration)
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
) -> DynamicResult<(D, Duration)> {
    handler.parse_start();
    let (result, duration) = measure_duration!(D::parse(input));
    let parsed = result?;
    handler.parse_end(duration);
    Ok((parsed, duration))
}

/// Run a solution whose parts take the raw input string.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated. Part two does not run
/// if part one failed.
pub fn solve_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
) -> DynamicResult<Timings>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(name);
    let part_one = run_part::<S1, PartOne>(input, handler)?;
    let part_two = run_part::<S2, PartTwo>(input, handler)?;
    let timings = Timings {
        parse: None,
        part_one,
        part_two,
    };
    handler.solution_end(&timings);
    Ok(timings)
}

/// Run a solution that parses input into `D` once and passes it to both parts.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
) -> DynamicResult<Timings>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let (parsed, parse) = run_parse::<D>(input, handler)?;
    let part_one = run_part::<S1, PartOne>(&parsed, handler)?;
    let part_two = run_part::<S2, PartTwo>(&parsed, handler)?;
    let timings = Timings {
        parse: Some(parse),
        part_one,
        part_two,
    };
    handler.solution_end(&timings);
    Ok(timings)
}

/// A solution that can be run from raw input.
///
/// Implement with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution, reporting events to `handler`.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler) -> DynamicResult<Timings>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse start".to_owned());
        }

        fn parse_end(&mut self, _duration: Duration) {
            self.events.push("parse end".to_owned());
        }

        fn part_start(&mut self, part: PartKind) {
            self.events.push(format!("{part} start"));
        }

        fn part_output(&mut self, part: PartKind, output: &dyn Display, _duration: Duration) {
            self.events.push(format!("{part} = {output}"));
        }

        fn solution_end(&mut self, _timings: &Timings) {
            self.events.push("end".to_owned());
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            if input.trim().is_empty() {
                return Err("no words".into());
            }
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct CountWords;

    impl Solution<PartOne> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    impl Solution<PartTwo> for CountWords {
        type Input = Words;
        type Output = String;

        fn solve(input: &Words) -> DynamicResult<String> {
            input
                .0
                .iter()
                .max_by_key(|word| word.len())
                .cloned()
                .ok_or_else(|| "no longest word".into())
        }
    }

    struct CountBytes;

    impl Solution<PartOne> for CountBytes {
        type Input = str;
        type Output = usize;

        fn solve(input: &str) -> DynamicResult<usize> {
            Ok(input.len())
        }
    }

    impl Solution<PartTwo> for CountBytes {
        type Input = str;
        type Output = usize;

        fn solve(_input: &str) -> DynamicResult<usize> {
            Err("part two always fails".into())
        }
    }

    #[test]
    fn parsed_solution_emits_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        let timings = solve_parsed_solution::<Words, CountWords, CountWords>(
            "Words",
            "a bb ccc",
            &mut handler,
        )?;

        assert_eq!(
            handler.events,
            vec![
                "name Words",
                "parse start",
                "parse end",
                "Part 1 start",
                "Part 1 = 3",
                "Part 2 start",
                "Part 2 = ccc",
                "end",
            ]
        );
        assert!(timings.parse.is_some());
        Ok(())
    }

    #[test]
    fn parse_failure_stops_before_parts() {
        let mut handler = RecordingHandler::default();
        let result =
            solve_parsed_solution::<Words, CountWords, CountWords>("Words", "  ", &mut handler);

        assert!(result.is_err());
        assert_eq!(handler.events, vec!["name Words", "parse start"]);
    }

    #[test]
    fn part_failure_is_propagated_without_end_event() {
        let mut handler = RecordingHandler::default();
        let result = solve_solution::<CountBytes, CountBytes>("Bytes", "abcd", &mut handler);

        assert!(result.is_err());
        assert_eq!(
            handler.events,
            vec!["name Bytes", "Part 1 start", "Part 1 = 4", "Part 2 start"]
        );
    }

    #[test]
    fn total_adds_every_step() {
        let timings = Timings {
            parse: Some(Duration::from_millis(2)),
            part_one: Duration::from_millis(3),
            part_two: Duration::from_millis(5),
        };
        assert_eq!(timings.total(), Duration::from_millis(10));

        let unparsed = Timings {
            parse: None,
            ..timings
        };
        assert_eq!(unparsed.total(), Duration::from_millis(8));
    }
}
