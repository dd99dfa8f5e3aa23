use std::ops::Range;

use advent_runner::parsing::{InputScanner, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

pub(super) const NAME: &str = "Day 5: If You Give A Seed A Fertilizer";

#[solution_runner(name = NAME, parsed = Almanac, part_one = Day05, part_two = Day05)]
impl super::Calendar2023<5> {}

/*
Input is an almanac made of blocks separated by empty lines.

The first block is a `seeds:` line listing seed numbers. Each following block is a map converting
numbers of one category into another, headed by `<source>-to-<destination> map:`. The maps chain:
the first converts seeds, and each map's source is the previous map's destination.

Every line of a map is a window of three numbers: destination start, source start, and length.
A source number inside a window shifts by the same amount as the window start; source numbers
outside every window convert to the same number.
*/

type AlmanacNumber = u64;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum ParseAlmanacError {
    #[error("expected \"seeds:\" line")]
    ExpectedSeeds,

    #[error("expected \"<source>-to-<destination> map:\" header, found {0:?}")]
    ExpectedMapHeader(String),

    #[error("map from {found:?} does not follow the previous category {expected:?}")]
    BrokenChain { expected: String, found: String },

    #[error("expected \"<destination> <source> <length>\", found {0:?}")]
    ExpectedWindow(String),

    #[error("window at source {0} has zero length")]
    EmptyWindow(AlmanacNumber),

    #[error("window at source {0} runs past the largest number")]
    WindowOverflow(AlmanacNumber),

    #[error("map {0:?} has no windows")]
    EmptyMap(String),
}

/// Part of a map: source numbers in a range shift to start at a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Window {
    source: Range<AlmanacNumber>,
    destination_start: AlmanacNumber,
}

impl Window {
    fn new(
        destination_start: AlmanacNumber,
        source_start: AlmanacNumber,
        length: AlmanacNumber,
    ) -> Result<Self, ParseAlmanacError> {
        if length == 0 {
            return Err(ParseAlmanacError::EmptyWindow(source_start));
        }
        let source_end = source_start
            .checked_add(length)
            .ok_or(ParseAlmanacError::WindowOverflow(source_start))?;
        // shifted ranges stay representable once the destination end fits
        destination_start
            .checked_add(length)
            .ok_or(ParseAlmanacError::WindowOverflow(source_start))?;

        Ok(Self {
            source: source_start..source_end,
            destination_start,
        })
    }

    fn map_number(&self, number: AlmanacNumber) -> Option<AlmanacNumber> {
        self.source
            .contains(&number)
            .then(|| self.destination_start + (number - self.source.start))
    }

    /// Shift a range lying within the source range.
    fn shift(&self, range: &Range<AlmanacNumber>) -> Range<AlmanacNumber> {
        let start = self.destination_start + (range.start - self.source.start);
        start..start + (range.end - range.start)
    }
}

/// One stage of conversion between two categories.
#[derive(Debug)]
struct CategoryMap {
    source: String,
    destination: String,
    windows: Vec<Window>,
}

impl CategoryMap {
    fn map_number(&self, number: AlmanacNumber) -> AlmanacNumber {
        self.windows
            .iter()
            .find_map(|window| window.map_number(number))
            .unwrap_or(number)
    }

    /// Convert a set of ranges.
    ///
    /// Each window splits the still unconverted pieces into the parts before, inside, and after
    /// its source range. Inside parts are shifted into the output; the rest wait for later windows,
    /// and whatever no window claims passes through as is. Empty pieces are dropped.
    fn map_ranges(&self, ranges: Vec<Range<AlmanacNumber>>) -> Vec<Range<AlmanacNumber>> {
        let mut pending: Vec<_> = ranges.into_iter().filter(|range| !range.is_empty()).collect();
        let mut converted = Vec::new();

        for window in &self.windows {
            let mut unclaimed = Vec::with_capacity(pending.len());
            for piece in pending {
                let before = piece.start..piece.end.min(window.source.start);
                let inside = piece.start.max(window.source.start)..piece.end.min(window.source.end);
                let after = piece.start.max(window.source.end)..piece.end;

                if !inside.is_empty() {
                    converted.push(window.shift(&inside));
                }
                unclaimed.extend([before, after].into_iter().filter(|part| !part.is_empty()));
            }
            pending = unclaimed;
        }

        converted.extend(pending);
        converted
    }
}

struct Almanac {
    seeds: Vec<AlmanacNumber>,
    /// Maps in conversion order, starting from seeds.
    maps: Vec<CategoryMap>,
}

fn parse_map_header(line: &str) -> Result<(String, String), ParseAlmanacError> {
    line.strip_suffix(" map:")
        .and_then(|categories| categories.split_once("-to-"))
        .map(|(source, destination)| (source.to_owned(), destination.to_owned()))
        .ok_or_else(|| ParseAlmanacError::ExpectedMapHeader(line.to_owned()))
}

fn parse_window(line: &str) -> DynamicResult<Window> {
    let values: Vec<&str> = line.split_whitespace().collect();
    let [destination_start, source_start, length] = values.as_slice() else {
        return Err(ParseAlmanacError::ExpectedWindow(line.to_owned()).into());
    };
    Ok(Window::new(
        parse_with_context(destination_start)?,
        parse_with_context(source_start)?,
        parse_with_context(length)?,
    )?)
}

impl ParseData for Almanac {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        let seeds = scanner
            .next_item(|_, line| -> DynamicResult<Vec<AlmanacNumber>> {
                let list = line
                    .strip_prefix("seeds:")
                    .ok_or(ParseAlmanacError::ExpectedSeeds)?;
                Ok(list
                    .split_whitespace()
                    .map(parse_with_context)
                    .collect::<Result<_, _>>()?)
            })?
            .ok_or(ParseAlmanacError::ExpectedSeeds)?;

        let mut maps = Vec::new();
        let mut category = String::from("seed");
        while let Some((source, destination)) =
            scanner.next_item(|_, line| Ok(parse_map_header(line)?))?
        {
            if source != category {
                return Err(ParseAlmanacError::BrokenChain {
                    expected: category,
                    found: source,
                }
                .into());
            }
            let windows = scanner.collect_sequence(|_, line| parse_window(line))?;
            if windows.is_empty() {
                return Err(ParseAlmanacError::EmptyMap(format!("{source}-to-{destination}")).into());
            }

            category.clone_from(&destination);
            maps.push(CategoryMap {
                source,
                destination,
                windows,
            });
        }

        log::debug!(
            "almanac has {} seed numbers and {} maps ending at {category:?}",
            seeds.len(),
            maps.len()
        );
        Ok(Self { seeds, maps })
    }
}

/*
For part 1, convert each seed number through every map and find the lowest resulting location.
*/

impl Almanac {
    fn location_of(&self, seed: AlmanacNumber) -> AlmanacNumber {
        self.maps
            .iter()
            .fold(seed, |number, map| map.map_number(number))
    }
}

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .seeds
            .iter()
            .map(|&seed| input.location_of(seed))
            .min()
            .ok_or("almanac lists no seeds")?)
    }
}

/*
For part 2, the seeds line pairs up into ranges: a start followed by a length. There are far too
many seeds to convert one by one, so whole ranges are converted through each map instead.
*/

#[derive(thiserror::Error, Debug)]
#[error("seed numbers must pair up as start and length, found {0} numbers")]
struct UnpairedSeeds(usize);

impl Almanac {
    fn seed_ranges(&self) -> DynamicResult<Vec<Range<AlmanacNumber>>> {
        if self.seeds.len() % 2 != 0 {
            return Err(UnpairedSeeds(self.seeds.len()).into());
        }
        Ok(self
            .seeds
            .chunks_exact(2)
            .map(|pair| {
                let (start, length) = (pair[0], pair[1]);
                let end = start
                    .checked_add(length)
                    .ok_or("seed range runs past the largest number")?;
                Ok(start..end)
            })
            .collect::<Result<_, &str>>()?)
    }
}

impl Solution<PartTwo> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut ranges = input.seed_ranges()?;
        for map in &input.maps {
            ranges = map.map_ranges(ranges);
            log::debug!(
                "{}-to-{}: {} ranges",
                map.source,
                map.destination,
                ranges.len()
            );
        }

        Ok(ranges
            .iter()
            .map(|range| range.start)
            .min()
            .ok_or("no seed ranges to convert")?)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 35);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn example_seeds_reach_their_locations() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let locations: Vec<_> = parsed.seeds.iter().map(|&seed| parsed.location_of(seed)).collect();
        assert_eq!(locations, vec![82, 43, 86, 35]);
        Ok(())
    }

    #[test]
    fn rejects_maps_out_of_order() {
        let input = "seeds: 1 2\n\nsoil-to-water map:\n1 2 3\n";
        assert!(Almanac::parse(input).is_err());
    }

    #[test]
    fn rejects_empty_windows() {
        assert_eq!(Window::new(5, 10, 0), Err(ParseAlmanacError::EmptyWindow(10)));
        assert!(Almanac::parse("seeds: 1 2\n\nseed-to-soil map:\n1 2 0\n").is_err());
    }

    #[test]
    fn part_two_rejects_unpaired_seeds() -> DynamicResult<()> {
        let parsed = Almanac::parse("seeds: 1 2 3\n\nseed-to-soil map:\n1 2 3\n")?;
        assert!(<Day05 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn range_splits_around_window() {
        let map = CategoryMap {
            source: "a".to_owned(),
            destination: "b".to_owned(),
            windows: vec![Window::new(100, 10, 5).expect("window is valid")],
        };
        let mut ranges = map.map_ranges(vec![5..20]);
        ranges.sort_by_key(|range| range.start);
        assert_eq!(ranges, vec![5..10, 15..20, 100..105]);
    }

    fn window_strategy() -> impl Strategy<Value = Window> {
        (0u64..1_000, 0u64..1_000, 1u64..100).prop_map(|(destination, source, length)| {
            Window::new(destination, source, length).expect("small windows are valid")
        })
    }

    fn map_strategy() -> impl Strategy<Value = CategoryMap> {
        prop::collection::vec(window_strategy(), 0..6).prop_map(|windows| CategoryMap {
            source: "a".to_owned(),
            destination: "b".to_owned(),
            windows,
        })
    }

    fn ranges_strategy() -> impl Strategy<Value = Vec<Range<AlmanacNumber>>> {
        prop::collection::vec(
            (0u64..1_100, 0u64..60).prop_map(|(start, length)| start..start + length),
            0..4,
        )
    }

    proptest! {
        #[test]
        fn range_mapping_preserves_total_length(
            map in map_strategy(),
            ranges in ranges_strategy(),
        ) {
            let before: u64 = ranges.iter().map(|range| range.end - range.start).sum();
            let mapped = map.map_ranges(ranges);
            let after: u64 = mapped.iter().map(|range| range.end - range.start).sum();
            prop_assert_eq!(before, after);
            prop_assert!(mapped.iter().all(|range| !range.is_empty()));
        }

        #[test]
        fn range_mapping_agrees_with_number_mapping(
            map in map_strategy(),
            ranges in ranges_strategy(),
        ) {
            let mut by_number: Vec<u64> = ranges
                .iter()
                .flat_map(|range| range.clone())
                .map(|number| map.map_number(number))
                .collect();
            let mut by_range: Vec<u64> = map
                .map_ranges(ranges)
                .into_iter()
                .flatten()
                .collect();
            by_number.sort_unstable();
            by_range.sort_unstable();
            prop_assert_eq!(by_number, by_range);
        }
    }
}
