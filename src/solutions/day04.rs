use advent_runner::parsing::{parse_input_lines, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

pub(super) const NAME: &str = "Day 4: Scratchcards";

#[solution_runner(name = NAME, parsed = CardTable, part_one = Day04, part_two = Day04)]
impl super::Calendar2023<4> {}

/*
Input is a table of scratchcards, one per line. Each card lists its winning numbers and the numbers
scratched off, separated by `|`:

    Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
*/

#[derive(thiserror::Error, Debug)]
enum ParseCardError {
    #[error("expected \"Card <id>: <winning> | <scratched>\"")]
    ExpectedCardLayout,

    #[error("card number {0} is out of range, expected below {limit}", limit = NumberSet::LIMIT)]
    NumberOutOfRange(u8),

    #[error("number {0} is listed twice")]
    DuplicateNumber(u8),
}

/// A set of card numbers, one bit per number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct NumberSet(u128);

impl NumberSet {
    const LIMIT: u8 = 128;

    fn parse(list: &str) -> DynamicResult<Self> {
        let mut set = Self::default();
        for token in list.split_whitespace() {
            let number: u8 = parse_with_context(token)?;
            if number >= Self::LIMIT {
                return Err(ParseCardError::NumberOutOfRange(number).into());
            }
            let bit = 1u128 << number;
            if set.0 & bit != 0 {
                return Err(ParseCardError::DuplicateNumber(number).into());
            }
            set.0 |= bit;
        }
        Ok(set)
    }

    fn common_count(self, other: Self) -> u32 {
        (self.0 & other.0).count_ones()
    }
}

/// Only the match count of a card matters to either part.
struct CardTable {
    match_counts: Vec<u32>,
}

impl ParseData for CardTable {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let match_counts = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (_, numbers) = line
                .split_once(':')
                .ok_or(ParseCardError::ExpectedCardLayout)?;
            let (winning, scratched) = numbers
                .split_once('|')
                .ok_or(ParseCardError::ExpectedCardLayout)?;
            Ok(NumberSet::parse(winning)?.common_count(NumberSet::parse(scratched)?))
        })
        .collect::<Result<_, _>>()?;
        Ok(Self { match_counts })
    }
}

/*
For part 1, a card with matches is worth one point for the first match, doubled for each match
after it. Sum the points of every card.
*/

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = CardTable;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let points: Vec<u64> = input
            .match_counts
            .iter()
            .map(|&matches| match matches {
                0 => Some(0),
                // 2^(matches - 1)
                _ => 1u64.checked_shl(matches - 1),
            })
            .collect::<Option<_>>()
            .ok_or("card points overflowed")?;
        Ok(points
            .into_iter()
            .checked_sum()
            .ok_or("point sum overflowed")?)
    }
}

/*
For part 2, there are no points. A card with `m` matches wins one copy of each of the next `m` cards
instead; copies win more copies the same way. Copies never extend past the end of the table. Count
the cards held in the end, originals included.
*/

impl Solution<PartTwo> for Day04 {
    type Input = CardTable;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let card_count = input.match_counts.len();
        let mut held = vec![1u64; card_count];

        for (index, &matches) in input.match_counts.iter().enumerate() {
            let instances = held[index];
            let won_start = index + 1;
            let won_end = (won_start + matches as usize).min(card_count);
            for copies in &mut held[won_start..won_end] {
                *copies = copies
                    .checked_add(instances)
                    .ok_or("card copy count overflowed")?;
            }
        }

        Ok(held
            .into_iter()
            .checked_sum()
            .ok_or("card total overflowed")?)
    }
}
