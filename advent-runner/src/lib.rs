//! Traits and utilities for solving daily advent calendar puzzles.
//!
//! A day's solution is made of up to three pieces:
//!
//! - an optional input type implementing [`ParseData`], built once from the raw input text;
//! - a type implementing [`Solution<PartOne>`];
//! - a type implementing [`Solution<PartTwo>`] (often the same type as part one).
//!
//! The [`runner`] module drives these pieces, measuring how long each takes and reporting answers
//! through an [`OutputHandler`][runner::OutputHandler].
//!
//! # Example
//!
//! ```
//! use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//!
//! struct Depths(Vec<u32>);
//!
//! impl ParseData for Depths {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let values = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(values))
//!     }
//! }
//!
//! struct Sonar;
//!
//! impl Solution<PartOne> for Sonar {
//!     type Input = Depths;
//!     type Output = usize;
//!
//!     fn solve(input: &Depths) -> DynamicResult<usize> {
//!         Ok(input.0.windows(2).filter(|pair| pair[1] > pair[0]).count())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Sonar {
//!     type Input = Depths;
//!     type Output = u32;
//!
//!     fn solve(input: &Depths) -> DynamicResult<u32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! let depths = Depths::parse("199\n200\n208\n")?;
//! assert_eq!(<Sonar as Solution<PartOne>>::solve(&depths)?, 2);
//! assert_eq!(<Sonar as Solution<PartTwo>>::solve(&depths)?, 607);
//! # Ok::<(), advent_runner::DynamicError>(())
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::needless_collect,
    clippy::option_if_let_else,
    clippy::use_self
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod day;
pub mod parsing;
pub mod runner;

mod private {
    /// Keeps [`Part`][super::Part] implementations inside this crate.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Identifies one of the two parts of a day's puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A marker trait for the part a [`Solution`] solves.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Marks a [`Solution`] for part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Marks a [`Solution`] for part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution to one [`Part`] of a day's puzzle.
pub trait Solution<P: Part> {
    /// The input passed by reference to [`Solution::solve`].
    ///
    /// Set to `str` to receive the raw input, or to a type implementing [`ParseData`] to share one
    /// parse between both parts.
    type Input: ?Sized;

    /// The answer type.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// Invalid input or a puzzle without an answer is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// Data built by parsing the raw input text.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_kinds_display_as_labels() {
        assert_eq!(PartKind::One.to_string(), "Part 1");
        assert_eq!(PartKind::Two.to_string(), "Part 2");
    }

    #[test]
    fn markers_map_to_kinds() {
        assert_eq!(PartOne::kind(), PartKind::One);
        assert_eq!(PartTwo::kind(), PartKind::Two);
    }
}
