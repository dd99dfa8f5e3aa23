use advent_runner::parsing::parse_input_lines;
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;
use thiserror::Error;

pub(super) const NAME: &str = "Day 1: Trebuchet?!";

#[solution_runner(name = NAME, part_one = Day01, part_two = Day01)]
impl super::Calendar2023<1> {}

/*
Input is a calibration document. Every line hides a calibration value: the first and last digit of
the line, in order, form a two-digit number. A single digit counts as both first and last.

The answer for both parts is the sum of calibration values.
*/

#[derive(Error, Debug)]
enum CalibrationError {
    #[error("no digit found in line")]
    NoDigit,
    #[error("no digit or spelled out digit found in line")]
    NoDigitOrWord,
}

type CalibrationValue = u32;

fn calibration_value(first_digit: u32, last_digit: u32) -> CalibrationValue {
    first_digit * 10 + last_digit
}

fn sum_lines<F>(input: &str, mut line_value: F) -> DynamicResult<CalibrationValue>
where
    F: FnMut(&str) -> Result<CalibrationValue, CalibrationError>,
{
    let values: Vec<CalibrationValue> =
        parse_input_lines(input, |_, line| Ok(line_value(line)?)).collect::<Result<_, _>>()?;
    Ok(values
        .into_iter()
        .checked_sum()
        .ok_or("calibration sum overflowed")?)
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = str;
    type Output = CalibrationValue;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        sum_lines(input, |line| {
            let mut digits = line.chars().filter_map(|c| c.to_digit(10));
            let first = digits.next().ok_or(CalibrationError::NoDigit)?;
            let last = digits.next_back().unwrap_or(first);
            Ok(calibration_value(first, last))
        })
    }
}

/*
For part 2, digits may also be spelled out with letters ("one" through "nine"). Spelled digits can
share letters, like "eightwo" holding both 8 and 2.
*/

const DIGIT_WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Finds the first and last digit of a line, spelled or not.
///
/// Overlapping words are handled by searching the reversed line with a reversed pattern for the
/// last digit.
struct DigitFinder {
    forward: Regex,
    backward: Regex,
}

impl DigitFinder {
    fn new() -> Self {
        let forward_pattern = format!(r"[1-9]|{}", DIGIT_WORDS.join("|"));
        let reversed_words: Vec<String> = DIGIT_WORDS
            .iter()
            .map(|word| word.chars().rev().collect())
            .collect();
        let backward_pattern = format!(r"[1-9]|{}", reversed_words.join("|"));

        Self {
            forward: Regex::new(&forward_pattern).expect("digit pattern should be valid"),
            backward: Regex::new(&backward_pattern).expect("reversed pattern should be valid"),
        }
    }

    /// Value of a matched token; a reversed word is accepted through `reversed`.
    fn token_value(token: &str, reversed: bool) -> Option<u32> {
        if let Some(digit) = token.chars().next().and_then(|c| c.to_digit(10)) {
            return Some(digit);
        }
        let word: String = if reversed {
            token.chars().rev().collect()
        } else {
            token.to_owned()
        };
        DIGIT_WORDS
            .iter()
            .zip(1..)
            .find_map(|(candidate, value)| (*candidate == word).then_some(value))
    }

    fn line_value(&self, line: &str) -> Result<CalibrationValue, CalibrationError> {
        let first = self
            .forward
            .find(line)
            .and_then(|m| Self::token_value(m.as_str(), false))
            .ok_or(CalibrationError::NoDigitOrWord)?;

        let reversed_line: String = line.chars().rev().collect();
        let last = self
            .backward
            .find(&reversed_line)
            .and_then(|m| Self::token_value(m.as_str(), true))
            .ok_or(CalibrationError::NoDigitOrWord)?;

        Ok(calibration_value(first, last))
    }
}

impl Solution<PartTwo> for Day01 {
    type Input = str;
    type Output = CalibrationValue;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let finder = DigitFinder::new();
        sum_lines(input, |line| finder.line_value(line))
    }
}
