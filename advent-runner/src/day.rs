//! Day numbers of the calendar and selections of days to run.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// A day of the calendar, from 1 to 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    /// The first day of the calendar.
    pub const FIRST: Self = Self(1);
    /// The last day of the calendar.
    pub const LAST: Self = Self(25);

    /// Create a day from its number.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDayError::OutOfRange`] if the number is outside `1..=25`.
    pub fn new(number: u8) -> Result<Self, ParseDayError> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ParseDayError::OutOfRange(number.into()))
        }
    }

    /// The day's number.
    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Every day of the calendar in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }

    /// The conventional file name holding this day's input, e.g. `day05.txt`.
    #[must_use]
    pub fn input_file_name(self) -> String {
        format!("day{self}.txt")
    }
}

/// Formats the day number zero-padded to two digits.
impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// An error parsing a [`Day`] or [`DaySelection`] from a string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDayError {
    #[error("expected a day number or \"all\", found {0:?}")]
    NotANumber(String),

    #[error("day {0} is outside the calendar (1 to 25)")]
    OutOfRange(u32),
}

impl FromStr for Day {
    type Err = ParseDayError;

    /// Parse a day number, accepting leading zeros such as `"05"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number: u32 = trimmed
            .parse()
            .map_err(|_| ParseDayError::NotANumber(trimmed.to_owned()))?;
        u8::try_from(number)
            .map_err(|_| ParseDayError::OutOfRange(number))
            .and_then(Self::new)
    }
}

/// A single command line token selecting days to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelection {
    /// Every day with a solution.
    All,
    /// One specific day.
    Single(Day),
}

impl FromStr for DaySelection {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Single)
        }
    }
}
