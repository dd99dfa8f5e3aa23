//! Utility functions and errors for parsing input.

use std::iter::Peekable;
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::{DynamicError, DynamicResult};

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The zero-based index of the failing line.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse each non-blank line with a closure, mapping any error into an [`InvalidLine`].
///
/// The closure receives the zero-based line index and the line with trailing whitespace removed.
/// Blank lines are skipped but still counted, so indexes match positions in `input`.
///
/// # Errors
///
/// Each item is an [`InvalidLine`] error if the closure failed for that line.
pub fn parse_input_lines<T, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(usize, &str) -> DynamicResult<T>,
{
    input
        .lines()
        .map(str::trim_end)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(move |(line_index, line)| {
            parser(line_index, line).map_err(|source| InvalidLine { line_index, source })
        })
}

/// A cursor over input lines for inputs made of blocks separated by blank lines.
///
/// Lines are handed to parsing closures with trailing whitespace removed, along with their
/// zero-based index in the original input.
pub struct InputScanner<'a> {
    lines: Peekable<std::iter::Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    /// Create a scanner positioned at the first line of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Whether no lines remain, blank or otherwise.
    pub fn is_exhausted(&mut self) -> bool {
        self.lines.peek().is_none()
    }

    /// Skip over blank lines.
    ///
    /// Returns `Some(())` when a non-blank line follows, `None` if the input ran out.
    pub fn skip_empty(&mut self) -> Option<()> {
        while let Some((_, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                return Some(());
            }
            self.lines.next();
        }
        None
    }

    /// Parse the next line if it continues the current block.
    ///
    /// A blank line (or the end of input) ends the block, returning `Ok(None)` without consuming
    /// the blank line.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] if the parser fails.
    pub fn next_in_sequence<T, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &str) -> DynamicResult<T>,
    {
        match self.lines.peek() {
            Some((_, line)) if !line.trim().is_empty() => {}
            _ => return Ok(None),
        }
        let Some((line_index, line)) = self.lines.next() else {
            return Ok(None);
        };
        parser(line_index, line.trim_end())
            .map(Some)
            .map_err(|source| InvalidLine { line_index, source })
    }

    /// Skip blank lines, then parse the next line.
    ///
    /// Returns `Ok(None)` if only blank lines remained.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] if the parser fails.
    pub fn next_item<T, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &str) -> DynamicResult<T>,
    {
        if self.skip_empty().is_none() {
            return Ok(None);
        }
        self.next_in_sequence(parser)
    }

    /// Parse every line of the current block, stopping before the next blank line.
    ///
    /// # Errors
    ///
    /// An [`InvalidLine`] for the first line the parser fails on.
    pub fn collect_sequence<T, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        F: FnMut(usize, &str) -> DynamicResult<T>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_lines_skips_blank_lines_but_keeps_indexes() -> DynamicResult<()> {
        let input = "a\n\nb  \nc\n";
        let lines: Vec<(usize, String)> =
            parse_input_lines(input, |index, line| Ok((index, line.to_owned())))
                .collect::<Result<_, _>>()?;
        assert_eq!(
            lines,
            vec![
                (0, "a".to_owned()),
                (2, "b".to_owned()),
                (3, "c".to_owned())
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_input_lines_reports_failing_line() {
        let result: Result<Vec<u8>, _> =
            parse_input_lines("1\n2\nx\n", |_, line| Ok(parse_with_context(line)?)).collect();
        let error = result.expect_err("third line should fail");
        assert_eq!(error.line_index(), 2);
        assert_eq!(error.to_string(), "failure parsing line 3");
    }

    #[test]
    fn parse_with_context_names_the_string() {
        let error = parse_with_context::<u32>("12a").expect_err("should not parse");
        assert_eq!(error.to_string(), "failed to parse string: \"12a\"");
    }

    const BLOCKS: &str = "header\n\n1\n2\n\n\n3\n";

    #[test]
    fn scanner_walks_blocks() -> DynamicResult<()> {
        let mut scanner = InputScanner::new(BLOCKS);

        let header = scanner.next_in_sequence(|_, line| Ok(line.to_owned()))?;
        assert_eq!(header.as_deref(), Some("header"));
        // the blank line ends the first block
        assert!(scanner.next_in_sequence(|_, _| Ok(()))?.is_none());

        assert!(scanner.skip_empty().is_some());
        let first_block = scanner.collect_sequence(|_, line| Ok(parse_with_context::<u8>(line)?))?;
        assert_eq!(first_block, vec![1, 2]);

        let item = scanner.next_item(|index, line| Ok((index, line.to_owned())))?;
        assert_eq!(item, Some((6, "3".to_owned())));

        assert!(scanner.skip_empty().is_none());
        assert!(scanner.is_exhausted());
        Ok(())
    }

    #[test]
    fn scanner_next_item_on_trailing_blanks_is_none() -> DynamicResult<()> {
        let mut scanner = InputScanner::new("\n\n");
        assert!(scanner.next_item(|_, _| Ok(()))?.is_none());
        Ok(())
    }

    #[test]
    fn scanner_errors_carry_line_index() {
        let mut scanner = InputScanner::new("\n\nbad\n");
        let error = scanner
            .next_item(|_, line| Ok(parse_with_context::<u8>(line)?))
            .expect_err("line should fail to parse");
        assert_eq!(error.line_index(), 2);
    }
}
