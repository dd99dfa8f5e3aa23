use std::str::FromStr;

use advent_runner::parsing::{parse_input_lines, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicError, DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

use crate::checked_math::CheckedProduct;

pub(super) const NAME: &str = "Day 2: Cube Conundrum";

#[solution_runner(name = NAME, parsed = Games, part_one = Day02, part_two = Day02)]
impl super::Calendar2023<2> {}

/*
Input is a record of games played with a bag of red, green, and blue cubes. Each line holds a game
ID, then semicolon-separated handfuls of cubes pulled from the bag, each handful a comma-separated
list of `<count> <color>`:

    Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
*/

type CubeCount = u32;

/// Counts of cubes by color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CubeSet {
    red: CubeCount,
    green: CubeCount,
    blue: CubeCount,
}

#[derive(thiserror::Error, Debug)]
enum ParseGameError {
    #[error("expected \"Game <id>: <handfuls>\", found {0:?}")]
    ExpectedGameHeader(String),

    #[error("expected \"<count> <color>\", found {0:?}")]
    ExpectedCountColor(String),

    #[error("unsupported color: {0:?}")]
    UnsupportedColor(String),

    #[error("color {color:?} appears twice in handful {handful:?}")]
    DuplicateColor { color: String, handful: String },
}

impl FromStr for CubeSet {
    type Err = DynamicError;

    fn from_str(handful: &str) -> Result<Self, Self::Err> {
        let mut set = Self::default();
        let mut seen = [false; 3];

        for count_color in handful.split(',').map(str::trim) {
            let (count_str, color) = count_color
                .split_once(' ')
                .ok_or_else(|| ParseGameError::ExpectedCountColor(count_color.to_owned()))?;
            let count: CubeCount = parse_with_context(count_str)?;

            let (slot, seen_index) = match color.trim() {
                "red" => (&mut set.red, 0),
                "green" => (&mut set.green, 1),
                "blue" => (&mut set.blue, 2),
                other => return Err(ParseGameError::UnsupportedColor(other.to_owned()).into()),
            };
            if seen[seen_index] {
                return Err(ParseGameError::DuplicateColor {
                    color: color.to_owned(),
                    handful: handful.trim().to_owned(),
                }
                .into());
            }
            seen[seen_index] = true;
            *slot = count;
        }

        Ok(set)
    }
}

impl CubeSet {
    /// Whether every count fits within the counts of `bag`.
    fn fits_within(&self, bag: &Self) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// The per-color maximum of two sets.
    fn union_max(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    /// The product of the counts, `None` on overflow.
    fn power(&self) -> Option<u64> {
        [self.red, self.green, self.blue]
            .into_iter()
            .map(u64::from)
            .checked_product()
    }
}

#[derive(Debug)]
struct Game {
    id: u32,
    handfuls: Vec<CubeSet>,
}

struct Games(Vec<Game>);

impl ParseData for Games {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let games = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (header, handfuls_str) = line
                .split_once(':')
                .ok_or_else(|| ParseGameError::ExpectedGameHeader(line.to_owned()))?;
            let id_str = header
                .strip_prefix("Game ")
                .ok_or_else(|| ParseGameError::ExpectedGameHeader(line.to_owned()))?;
            let id: u32 = parse_with_context(id_str.trim())?;

            let handfuls = handfuls_str
                .split(';')
                .map(str::parse::<CubeSet>)
                .collect::<Result<_, _>>()?;

            Ok(Game { id, handfuls })
        })
        .collect::<Result<_, _>>()?;

        Ok(Self(games))
    }
}

/*
For part 1, find which games would have been possible with only 12 red, 13 green, and 14 blue cubes
in the bag. Sum the IDs of those games.
*/

const PART_ONE_BAG: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Games;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .iter()
            .filter(|game| {
                game.handfuls
                    .iter()
                    .all(|handful| handful.fits_within(&PART_ONE_BAG))
            })
            .map(|game| game.id)
            .checked_sum()
            .ok_or("game ID sum overflowed")?)
    }
}

/*
For part 2, find the fewest cubes of each color that make a game possible. The power of that set is
the product of its counts; sum the powers of every game.
*/

impl Game {
    /// The smallest bag this game could have been played with.
    fn minimal_bag(&self) -> CubeSet {
        self.handfuls
            .iter()
            .fold(CubeSet::default(), |bag, &handful| bag.union_max(handful))
    }
}

impl Solution<PartTwo> for Day02 {
    type Input = Games;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let powers: Vec<u64> = input
            .0
            .iter()
            .map(|game| game.minimal_bag().power())
            .collect::<Option<_>>()
            .ok_or("cube set power overflowed")?;
        Ok(powers
            .into_iter()
            .checked_sum()
            .ok_or("power sum overflowed")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2286);
        Ok(())
    }

    #[test]
    fn minimal_bag_of_first_game() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let bag = parsed.0[0].minimal_bag();
        assert_eq!(
            bag,
            CubeSet {
                red: 4,
                green: 2,
                blue: 6
            }
        );
        assert_eq!(bag.power(), Some(48));
        Ok(())
    }

    #[test]
    fn rejects_duplicate_and_unknown_colors() {
        assert!(Games::parse("Game 1: 1 red, 2 red\n").is_err());
        assert!(Games::parse("Game 1: 1 purple\n").is_err());
        assert!(Games::parse("Round 1: 1 red\n").is_err());
    }
}
