//! Run configuration resolved from command line arguments.

use std::path::PathBuf;
use std::time::Duration;

use advent_runner::day::{Day, DaySelection};
use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::solutions;

/// Solve puzzles of the 2023 advent calendar.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Days to run (e.g. 1 05 12), or "all" for every day with a solution.
    #[arg(required = true, value_name = "DAYS")]
    pub days: Vec<DaySelection>,

    /// An alternative input file. Only allowed when running a single day.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory holding default input files named like `day05.txt`.
    #[arg(long, value_name = "DIR", env = "ADVENT_INPUT_DIR", default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Print how long parsing and each part took.
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub timed: bool,

    /// Minimum duration (in milliseconds) required to print a timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    pub min_timing_ms: u64,

    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where inputs are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A directory of `dayNN.txt` files.
    Directory(PathBuf),
    /// One file for the single selected day.
    File(PathBuf),
}

/// An invalid combination of command line arguments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("an input file can only be given when running a single day ({0} days selected)")]
    InputFileForManyDays(usize),

    #[error("no solution available for day {0}")]
    DayNotAvailable(Day),
}

/// Validated settings for a run.
#[derive(Debug)]
pub struct Config {
    /// Days to run, ascending and without duplicates.
    pub days: Vec<Day>,
    /// Where to read inputs from.
    pub input: InputSource,
    /// Whether timings are printed.
    pub timed: bool,
    /// Timings shorter than this are not printed.
    pub min_timing: Duration,
}

impl Config {
    /// Resolve the command line into a run configuration.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] if a selected day has no solution, or an input file was given for more
    /// than one day.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut days = Vec::new();
        for selection in cli.days {
            match selection {
                DaySelection::All => days.extend(solutions::available_days()),
                DaySelection::Single(day) => {
                    if !solutions::is_available(day) {
                        return Err(ConfigError::DayNotAvailable(day));
                    }
                    days.push(day);
                }
            }
        }
        days.sort_unstable();
        days.dedup();

        let input = match cli.input {
            Some(file) if days.len() == 1 => InputSource::File(file),
            Some(_) => return Err(ConfigError::InputFileForManyDays(days.len())),
            None => InputSource::Directory(cli.input_dir),
        };

        Ok(Self {
            days,
            input,
            timed: cli.timed,
            min_timing: Duration::from_millis(cli.min_timing_ms),
        })
    }

    /// The input file path for a day.
    #[must_use]
    pub fn input_path(&self, day: Day) -> PathBuf {
        match &self.input {
            InputSource::File(file) => file.clone(),
            InputSource::Directory(directory) => directory.join(day.input_file_name()),
        }
    }
}

/// Initialize logging; `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: u8) {
    use env_logger::{Builder, Env};

    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("advent-2023").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn days_are_sorted_and_deduplicated() -> Result<(), ConfigError> {
        let config = Config::from_cli(cli(&["10", "02", "2"]))?;
        let numbers: Vec<u8> = config.days.iter().map(|day| day.number()).collect();
        assert_eq!(numbers, vec![2, 10]);
        Ok(())
    }

    #[test]
    fn all_selects_every_available_day() -> Result<(), ConfigError> {
        let config = Config::from_cli(cli(&["all", "3"]))?;
        assert_eq!(config.days, solutions::available_days().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn unavailable_day_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let error = Config::from_cli(cli(&["24"])).expect_err("day 24 has no solution");
        assert_eq!(error, ConfigError::DayNotAvailable(Day::new(24)?));
        Ok(())
    }

    #[test]
    fn input_file_requires_single_day() {
        let error = Config::from_cli(cli(&["1", "2", "--input", "x.txt"]))
            .expect_err("two days with one input file");
        assert_eq!(error, ConfigError::InputFileForManyDays(2));
    }

    #[test]
    fn input_paths_follow_source() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_cli(cli(&["5", "--input-dir", "puzzles"]))?;
        assert_eq!(
            config.input_path(Day::new(5)?),
            Path::new("puzzles").join("day05.txt")
        );

        let config = Config::from_cli(cli(&["5", "-i", "mine.txt", "-t"]))?;
        assert_eq!(config.input_path(Day::new(5)?), PathBuf::from("mine.txt"));
        assert!(config.timed);
        Ok(())
    }

    #[test]
    fn invalid_day_token_fails_to_parse() {
        let args = ["advent-2023", "26"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
