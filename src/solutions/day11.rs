use advent_runner::parsing::parse_input_lines;
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::Point2;

pub(super) const NAME: &str = "Day 11: Cosmic Expansion";

#[solution_runner(name = NAME, parsed = Image, part_one = Day11, part_two = Day11)]
impl super::Calendar2023<11> {}

/*
Input is an image of space: `#` marks a galaxy and `.` empty space.

Every row and column without a galaxy is actually larger than it looks, by an expansion factor.
The answer for both parts is the sum of shortest paths between every pair of galaxies, moving up,
down, left, or right.
*/

#[derive(thiserror::Error, Debug)]
#[error("unknown pixel {0:?}, expected '#' or '.'")]
struct UnknownPixel(char);

struct Image {
    galaxies: Vec<Point2<u64>>,
}

impl ParseData for Image {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut galaxies = Vec::new();
        parse_input_lines(input, |line_index, line| -> DynamicResult<_> {
            for (column, pixel) in line.chars().enumerate() {
                match pixel {
                    '#' => galaxies.push(Point2::new(
                        u64::try_from(column)?,
                        u64::try_from(line_index)?,
                    )),
                    '.' => {}
                    other => return Err(UnknownPixel(other).into()),
                }
            }
            Ok(())
        })
        .collect::<Result<(), _>>()?;

        log::debug!("image has {} galaxies", galaxies.len());
        Ok(Self { galaxies })
    }
}

/// Sum of distances between every pair of coordinates along one axis, after expansion.
///
/// Sorted, each coordinate is the farther one of a pair with every coordinate before it, so it
/// adds `index * coordinate - sum of earlier coordinates` to the total.
fn axis_distance_sum(mut coordinates: Vec<u64>, expansion: u64) -> Option<u64> {
    coordinates.sort_unstable();

    let mut empty_before = 0u64;
    let mut previous = coordinates.first().copied()?;
    let mut earlier_sum = 0u64;
    let mut total = 0u64;

    for (index, &coordinate) in (0u64..).zip(&coordinates) {
        // lines strictly between two occupied lines are empty
        empty_before += coordinate.saturating_sub(previous).saturating_sub(1);
        previous = coordinate;

        let expanded = empty_before
            .checked_mul(expansion - 1)?
            .checked_add(coordinate)?;
        total = index
            .checked_mul(expanded)?
            .checked_sub(earlier_sum)?
            .checked_add(total)?;
        earlier_sum = earlier_sum.checked_add(expanded)?;
    }

    Some(total)
}

impl Image {
    fn distance_sum(&self, expansion: u64) -> DynamicResult<u64> {
        if self.galaxies.is_empty() {
            return Ok(0);
        }
        let xs = self.galaxies.iter().map(|galaxy| galaxy.x).collect();
        let ys = self.galaxies.iter().map(|galaxy| galaxy.y).collect();
        let overflow = "distance sum overflowed";

        axis_distance_sum(xs, expansion)
            .zip(axis_distance_sum(ys, expansion))
            .and_then(|(x, y)| x.checked_add(y))
            .ok_or_else(|| overflow.into())
    }
}

/*
For part 1, each empty row or column is twice as big.
*/

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.distance_sum(2)
    }
}

/*
For part 2, each empty row or column is one million times as big.
*/

impl Solution<PartTwo> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.distance_sum(1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Image::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 374);
        Ok(())
    }

    #[test]
    fn larger_expansions_of_example() -> DynamicResult<()> {
        let parsed = Image::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.distance_sum(10)?, 1030);
        assert_eq!(parsed.distance_sum(100)?, 8410);
        Ok(())
    }

    #[test]
    fn axis_sum_matches_pairwise_sum() {
        let coordinates = vec![7, 0, 3, 3, 12];
        let expand = |coordinate: u64| {
            let empty = (0..coordinate)
                .filter(|line| !coordinates.contains(line))
                .count() as u64;
            coordinate + empty * 4
        };
        let mut pairwise = 0;
        for (index, &a) in coordinates.iter().enumerate() {
            for &b in &coordinates[index + 1..] {
                pairwise += expand(a).abs_diff(expand(b));
            }
        }
        assert_eq!(axis_distance_sum(coordinates.clone(), 5), Some(pairwise));
    }

    #[test]
    fn empty_image_has_no_distance() -> DynamicResult<()> {
        let parsed = Image::parse("...\n...\n")?;
        assert_eq!(<Day11 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }
}
