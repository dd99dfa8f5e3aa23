use std::collections::HashMap;
use std::num::TryFromIntError;

use advent_runner::parsing::parse_input_lines;
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::Point2;

pub(super) const NAME: &str = "Day 3: Gear Ratios";

#[solution_runner(name = NAME, parsed = Schematic, part_one = Day03, part_two = Day03)]
impl super::Calendar2023<3> {}

/*
Input is an engine schematic: a grid of digits, periods (`.`) as empty space, and any other
character as a symbol. A number is a horizontal run of digits.
*/

/// A number in the schematic and the span of cells it covers.
#[derive(Debug, PartialEq, Eq)]
struct SchematicNumber {
    value: u32,
    row: i32,
    /// First column, inclusive.
    first_column: i32,
    /// Last column, inclusive.
    last_column: i32,
}

impl SchematicNumber {
    /// Whether a cell touches the number, diagonals included.
    fn is_adjacent_to(&self, position: Point2<i32>) -> bool {
        (position.y - self.row).abs() <= 1
            && position.x >= self.first_column - 1
            && position.x <= self.last_column + 1
    }

    /// Every cell around the number.
    fn neighborhood(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        (self.row - 1..=self.row + 1).flat_map(move |y| {
            (self.first_column - 1..=self.last_column + 1).map(move |x| Point2::new(x, y))
        })
    }
}

/// The parsed engine schematic.
struct Schematic {
    numbers: Vec<SchematicNumber>,
    /// Symbol characters by position.
    symbols: HashMap<Point2<i32>, char>,
}

#[derive(thiserror::Error, Debug)]
enum ParseSchematicError {
    #[error("too many lines or columns to index")]
    CoordinateOverflow(#[from] TryFromIntError),

    #[error("number starting at column {column} is too large")]
    NumberOverflow { column: i32 },
}

/// A number being read, digit by digit.
struct PendingNumber {
    value: u32,
    first_column: i32,
}

impl ParseData for Schematic {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut numbers = Vec::new();
        let mut symbols = HashMap::new();

        parse_input_lines(input, |line_index, line| -> DynamicResult<_> {
            let row = i32::try_from(line_index).map_err(ParseSchematicError::from)?;
            let mut pending: Option<PendingNumber> = None;

            for (char_index, character) in line.chars().enumerate() {
                let column = i32::try_from(char_index).map_err(ParseSchematicError::from)?;

                if let Some(digit) = character.to_digit(10) {
                    let number = pending.get_or_insert(PendingNumber {
                        value: 0,
                        first_column: column,
                    });
                    number.value = number
                        .value
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(digit))
                        .ok_or(ParseSchematicError::NumberOverflow {
                            column: number.first_column,
                        })?;
                    continue;
                }

                if let Some(number) = pending.take() {
                    numbers.push(SchematicNumber {
                        value: number.value,
                        row,
                        first_column: number.first_column,
                        last_column: column - 1,
                    });
                }
                if character != '.' && !character.is_whitespace() {
                    symbols.insert(Point2::new(column, row), character);
                }
            }

            // a number can run to the end of the line
            if let Some(number) = pending {
                let line_end =
                    i32::try_from(line.chars().count()).map_err(ParseSchematicError::from)?;
                numbers.push(SchematicNumber {
                    value: number.value,
                    row,
                    first_column: number.first_column,
                    last_column: line_end - 1,
                });
            }
            Ok(())
        })
        .collect::<Result<(), _>>()?;

        log::debug!(
            "schematic has {} numbers and {} symbols",
            numbers.len(),
            symbols.len()
        );
        Ok(Self { numbers, symbols })
    }
}

/*
For part 1, a part number is any number adjacent to a symbol, even diagonally. Sum the part numbers.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = Schematic;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .numbers
            .iter()
            .filter(|number| {
                number
                    .neighborhood()
                    .any(|position| input.symbols.contains_key(&position))
            })
            .map(|number| number.value)
            .checked_sum()
            .ok_or("part number sum overflowed")?)
    }
}

/*
For part 2, a gear is a `*` symbol adjacent to exactly two part numbers. Its gear ratio is the
product of those numbers. Sum every gear ratio.
*/

impl Solution<PartTwo> for Day03 {
    type Input = Schematic;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut ratios = Vec::new();
        for (&position, _) in input.symbols.iter().filter(|&(_, &symbol)| symbol == '*') {
            let adjacent: Vec<_> = input
                .numbers
                .iter()
                .filter(|number| number.is_adjacent_to(position))
                .collect();
            if let [first, second] = adjacent.as_slice() {
                ratios.push(u64::from(first.value) * u64::from(second.value));
            }
        }

        Ok(ratios
            .into_iter()
            .checked_sum()
            .ok_or("gear ratio sum overflowed")?)
    }
}
