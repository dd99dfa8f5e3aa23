use std::collections::VecDeque;
use std::fmt;

use advent_runner::parsing::parse_input_lines;
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{DMatrix, Point2, Vector2};

pub(super) const NAME: &str = "Day 10: Pipe Maze";

#[solution_runner(name = NAME, parsed = PipeMaze, part_one = Day10, part_two = Day10)]
impl super::Calendar2023<10> {}

/*
Input is a grid of tiles:

- `|` and `-` are vertical and horizontal pipes.
- `L`, `J`, `7`, and `F` are bends connecting north-east, north-west, south-west, and south-east.
- `.` is ground.
- `S` is where the animal starts: a pipe of unknown shape that is part of one closed loop.
*/

type Position = Point2<isize>;

/// Directions in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    const CLOCKWISE: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn turned(self, quarter_turns: usize) -> Self {
        Self::CLOCKWISE[(self as usize + quarter_turns) % 4]
    }

    fn right(self) -> Self {
        self.turned(1)
    }

    fn opposite(self) -> Self {
        self.turned(2)
    }

    fn left(self) -> Self {
        self.turned(3)
    }

    fn offset(self) -> Vector2<isize> {
        match self {
            Self::North => Vector2::new(0, -1),
            Self::East => Vector2::new(1, 0),
            Self::South => Vector2::new(0, 1),
            Self::West => Vector2::new(-1, 0),
        }
    }
}

/// The set of directions a tile connects to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Connections(u8);

impl Connections {
    fn of(directions: &[Direction]) -> Self {
        Self(
            directions
                .iter()
                .fold(0, |bits, &direction| bits | (1 << direction as u8)),
        )
    }

    fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction as u8) != 0
    }

    fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::CLOCKWISE
            .into_iter()
            .filter(move |&direction| self.contains(direction))
    }
}

impl fmt::Display for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Direction::{East, North, South, West};

        let symbol = match self.directions().collect::<Vec<_>>().as_slice() {
            [North, South] => '|',
            [East, West] => '-',
            [North, East] => 'L',
            [North, West] => 'J',
            [South, West] => '7',
            [East, South] => 'F',
            [] => '.',
            _ => '?',
        };
        write!(f, "{symbol}")
    }
}

#[derive(thiserror::Error, Debug)]
enum ParseMazeError {
    #[error("unknown tile {0:?}")]
    UnknownTile(char),

    #[error("line {line} has {found} tiles, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected exactly one start tile, found {0}")]
    StartCount(usize),

    #[error("start tile connects to {0} pipes, expected 2")]
    StartConnections(usize),
}

/// The grid of pipes, with the start tile replaced by the pipe shape it must have.
struct PipeMaze {
    tiles: DMatrix<Connections>,
    start: Position,
}

impl ParseData for PipeMaze {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        use Direction::{East, North, South, West};

        let mut starts = Vec::new();
        let mut row = 0;
        let rows: Vec<Vec<Connections>> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let mut tiles = Vec::with_capacity(line.len());
            for (column, tile) in line.chars().enumerate() {
                tiles.push(match tile {
                    '|' => Connections::of(&[North, South]),
                    '-' => Connections::of(&[East, West]),
                    'L' => Connections::of(&[North, East]),
                    'J' => Connections::of(&[North, West]),
                    '7' => Connections::of(&[South, West]),
                    'F' => Connections::of(&[East, South]),
                    '.' => Connections::default(),
                    'S' => {
                        starts.push((row, column));
                        Connections::default()
                    }
                    other => return Err(ParseMazeError::UnknownTile(other).into()),
                });
            }
            row += 1;
            Ok(tiles)
        })
        .collect::<Result<_, _>>()?;

        let width = rows.first().map_or(0, Vec::len);
        if let Some((line, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(ParseMazeError::RaggedRow {
                line: line + 1,
                expected: width,
                found: row.len(),
            }
            .into());
        }
        let &[(start_row, start_column)] = starts.as_slice() else {
            return Err(ParseMazeError::StartCount(starts.len()).into());
        };

        let mut maze = Self {
            tiles: DMatrix::from_row_iterator(rows.len(), width, rows.into_iter().flatten()),
            start: Point2::new(isize::try_from(start_column)?, isize::try_from(start_row)?),
        };

        // the start is whatever pipe its neighbors connect back into
        let start_directions: Vec<Direction> = Direction::CLOCKWISE
            .into_iter()
            .filter(|&direction| {
                maze.connections_at(maze.start + direction.offset())
                    .contains(direction.opposite())
            })
            .collect();
        if start_directions.len() != 2 {
            return Err(ParseMazeError::StartConnections(start_directions.len()).into());
        }
        let start_pipe = Connections::of(&start_directions);
        maze.tiles[(start_row, start_column)] = start_pipe;

        log::debug!(
            "maze is {}x{}, start at {} is {start_pipe}",
            maze.tiles.ncols(),
            maze.tiles.nrows(),
            maze.start
        );
        Ok(maze)
    }
}

impl PipeMaze {
    /// The matrix index of a position, `None` outside the grid.
    fn index(&self, position: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(position.y).ok()?;
        let column = usize::try_from(position.x).ok()?;
        (row < self.tiles.nrows() && column < self.tiles.ncols()).then_some((row, column))
    }

    /// Connections of the tile at a position; outside the grid is ground.
    fn connections_at(&self, position: Position) -> Connections {
        self.index(position)
            .map(|index| self.tiles[index])
            .unwrap_or_default()
    }
}

/*
For part 1, find the tile of the loop farthest from the start, counting steps along the loop.
*/

/// A tile of the loop and the directions of travel into and out of it.
#[derive(Debug)]
struct LoopTile {
    position: Position,
    entry: Direction,
    exit: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winding {
    Clockwise,
    Anticlockwise,
}

struct PipeLoop {
    tiles: Vec<LoopTile>,
    winding: Winding,
}

#[derive(thiserror::Error, Debug)]
enum TraceError {
    #[error("pipe at {0} does not connect back to the loop")]
    Broken(Position),

    #[error("loop turns {0} times in total, expected 4 or -4")]
    NotSimple(isize),
}

impl PipeMaze {
    /// Follow the loop from the start until returning to it.
    ///
    /// Each right turn counts +1 and each left turn -1. A closed loop turns four times more one
    /// way than the other, which tells its winding.
    fn trace_loop(&self) -> Result<PipeLoop, TraceError> {
        let start_pipe = self.connections_at(self.start);
        let mut heading = start_pipe
            .directions()
            .next()
            .ok_or(TraceError::Broken(self.start))?;
        let mut position = self.start;
        let mut tiles = Vec::new();
        let mut turns: isize = 0;

        loop {
            position += heading.offset();
            let entry = heading;
            let pipe = self.connections_at(position);
            if !pipe.contains(entry.opposite()) {
                return Err(TraceError::Broken(position));
            }
            let exit = pipe
                .directions()
                .find(|&direction| direction != entry.opposite())
                .ok_or(TraceError::Broken(position))?;

            if exit == entry.right() {
                turns += 1;
            } else if exit == entry.left() {
                turns -= 1;
            }
            tiles.push(LoopTile {
                position,
                entry,
                exit,
            });

            if position == self.start {
                break;
            }
            heading = exit;
        }

        let winding = match turns {
            4 => Winding::Clockwise,
            -4 => Winding::Anticlockwise,
            other => return Err(TraceError::NotSimple(other)),
        };
        log::debug!("loop has {} tiles, winding {winding:?}", tiles.len());
        Ok(PipeLoop { tiles, winding })
    }
}

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = PipeMaze;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.trace_loop()?.tiles.len() / 2)
    }
}

/*
For part 2, count the tiles enclosed by the loop. Squeezing between pipes is allowed, so enclosure
is about being inside the loop and not about being reachable from the outside.

Walking a clockwise loop, the inside is always on the right; anticlockwise, on the left. The
neighbors on the inside of every loop tile seed a flood fill that cannot cross the loop.
*/

impl Solution<PartTwo> for Day10 {
    type Input = PipeMaze;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let pipe_loop = input.trace_loop()?;
        let inside = |direction: Direction| match pipe_loop.winding {
            Winding::Clockwise => direction.right(),
            Winding::Anticlockwise => direction.left(),
        };

        let (rows, columns) = input.tiles.shape();
        let mut blocked = DMatrix::from_element(rows, columns, false);
        for tile in &pipe_loop.tiles {
            if let Some(index) = input.index(tile.position) {
                blocked[index] = true;
            }
        }

        let mut queue: VecDeque<Position> = pipe_loop
            .tiles
            .iter()
            .flat_map(|tile| {
                [tile.entry, tile.exit]
                    .map(|direction| tile.position + inside(direction).offset())
            })
            .collect();

        let mut enclosed = 0;
        while let Some(position) = queue.pop_front() {
            let Some(index) = input.index(position) else {
                continue;
            };
            if blocked[index] {
                continue;
            }
            blocked[index] = true;
            enclosed += 1;
            queue.extend(
                Direction::CLOCKWISE
                    .iter()
                    .map(|direction| position + direction.offset()),
            );
        }

        Ok(enclosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_LOOP: &str = r".....
.S-7.
.|.|.
.L-J.
.....
";

    const WINDING_LOOP: &str = r"..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(SQUARE_LOOP)?;
        assert_eq!(<Day10 as Solution<PartOne>>::solve(&parsed)?, 4);

        let parsed = PipeMaze::parse(WINDING_LOOP)?;
        assert_eq!(<Day10 as Solution<PartOne>>::solve(&parsed)?, 8);
        Ok(())
    }

    #[test]
    fn infers_start_pipe() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(SQUARE_LOOP)?;
        assert_eq!(parsed.start, Point2::new(1, 1));
        assert_eq!(parsed.connections_at(parsed.start).to_string(), "F");

        let parsed = PipeMaze::parse(WINDING_LOOP)?;
        assert_eq!(parsed.connections_at(parsed.start).to_string(), "F");
        Ok(())
    }

    #[test]
    fn part_two_counts_square_interior() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(SQUARE_LOOP)?;
        assert_eq!(parsed.trace_loop()?.winding, Winding::Clockwise);
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 1);
        Ok(())
    }

    #[test]
    fn part_two_handles_anticlockwise_loops() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(".....\n.F-7.\n.|.|.\n.L-S.\n.....\n")?;
        assert_eq!(parsed.trace_loop()?.winding, Winding::Anticlockwise);
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 1);
        Ok(())
    }

    const ENCLOSED_EXAMPLE: &str = r"...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const SQUEEZED_EXAMPLE: &str = r"..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

    const LARGER_EXAMPLE: &str = r".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        let parsed = PipeMaze::parse(ENCLOSED_EXAMPLE)?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 4);

        let parsed = PipeMaze::parse(SQUEEZED_EXAMPLE)?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 4);

        let parsed = PipeMaze::parse(LARGER_EXAMPLE)?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 8);
        Ok(())
    }

    #[test]
    fn rejects_bad_mazes() {
        // no start
        assert!(PipeMaze::parse("F7\nLJ\n").is_err());
        // two starts
        assert!(PipeMaze::parse("SS\nLJ\n").is_err());
        // start touching a single pipe
        assert!(PipeMaze::parse("S-.\n...\n").is_err());
        assert!(PipeMaze::parse("S-7\n|.\n").is_err());
        assert!(PipeMaze::parse("S-7\n|x|\n").is_err());
    }

    #[test]
    fn broken_loop_is_an_error() -> DynamicResult<()> {
        // both start neighbors connect back, but the pipes never meet again
        let parsed = PipeMaze::parse("S-.\n|..\n...\n")?;
        assert!(parsed.trace_loop().is_err());
        Ok(())
    }
}
