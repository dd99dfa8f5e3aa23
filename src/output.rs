//! Console output of answers and timings.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use advent_runner::PartKind;
use advent_runner::runner::{OutputHandler, Timings};

/// Prints solution events to stdout.
pub struct ConsoleOutput {
    /// Whether timings are printed at all.
    timed: bool,
    /// Timings shorter than this are not printed.
    min_duration: Duration,
    /// Accumulated time of every finished solution.
    total: Duration,
}

impl ConsoleOutput {
    pub fn new(timed: bool, min_duration: Duration) -> Self {
        Self {
            timed,
            min_duration,
            total: Duration::ZERO,
        }
    }

    pub(crate) fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} s", DECIMAL_PLACES, duration.as_secs_f64())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} ms", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} µs", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} ns")
            }
        }
    }

    /// The formatted duration, if timings are printed and it reaches the minimum.
    fn shown_duration(&self, duration: Duration) -> Option<String> {
        (self.timed && duration >= self.min_duration).then(|| Self::format_duration(duration))
    }

    /// Report a day that was not run because its input file is missing.
    pub fn day_skipped(&self, name: &str, path: &Path) {
        println!("{name}: skipped (input not found: {})", path.display());
    }

    /// Report the accumulated time of every solution run so far.
    pub fn run_summary(&self) {
        if self.timed {
            println!("Total runtime: {}", Self::format_duration(self.total));
        }
    }
}

impl OutputHandler for ConsoleOutput {
    fn solution_name(&mut self, name: &str) {
        println!("=== {name} ===");
    }

    fn parse_start(&mut self) {
        // nothing to show until parsing finished
    }

    fn parse_end(&mut self, duration: Duration) {
        if let Some(formatted) = self.shown_duration(duration) {
            println!("  · Parsed in {formatted}");
        }
    }

    fn part_start(&mut self, _part: PartKind) {
        // answers print on one line once known
    }

    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Duration) {
        match self.shown_duration(duration) {
            Some(formatted) => println!("  · {part}: {output} ({formatted})"),
            None => println!("  · {part}: {output}"),
        }
    }

    fn solution_end(&mut self, timings: &Timings) {
        let total = timings.total();
        self.total += total;
        if let Some(formatted) = self.shown_duration(total) {
            println!("  · Time: {formatted}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(
            ConsoleOutput::format_duration(Duration::from_millis(2500)),
            "2.500 s"
        );
        assert_eq!(
            ConsoleOutput::format_duration(Duration::from_micros(1500)),
            "1.500 ms"
        );
        assert_eq!(
            ConsoleOutput::format_duration(Duration::from_nanos(2250)),
            "2.250 µs"
        );
        assert_eq!(
            ConsoleOutput::format_duration(Duration::from_nanos(999)),
            "999 ns"
        );
    }

    #[test]
    fn hides_durations_below_minimum_or_untimed() {
        let output = ConsoleOutput::new(true, Duration::from_millis(1));
        assert_eq!(output.shown_duration(Duration::from_micros(10)), None);
        assert!(output.shown_duration(Duration::from_millis(3)).is_some());

        let untimed = ConsoleOutput::new(false, Duration::ZERO);
        assert_eq!(untimed.shown_duration(Duration::from_secs(3)), None);
    }

    #[test]
    fn accumulates_totals_across_solutions() {
        let mut output = ConsoleOutput::new(false, Duration::ZERO);
        let timings = Timings {
            parse: Some(Duration::from_millis(1)),
            part_one: Duration::from_millis(2),
            part_two: Duration::from_millis(3),
        };
        output.solution_end(&timings);
        output.solution_end(&timings);
        assert_eq!(output.total, Duration::from_millis(12));
    }
}
