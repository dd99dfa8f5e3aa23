#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Error, Result};
use clap::Parser;

use crate::config::{Cli, Config};
use crate::output::ConsoleOutput;

mod checked_math;
mod config;
mod output;
mod solutions;

/// Read an input file, or `None` if it does not exist.
fn read_input(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(input) => Ok(Some(input)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error)
            .with_context(|| format!("could not read input file at: {}", path.display())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_logging(cli.verbose);
    let config = Config::from_cli(cli).context("invalid arguments")?;
    log::debug!("running days {:?} with input from {:?}", config.days, config.input);

    let mut output = ConsoleOutput::new(config.timed, config.min_timing);
    for &day in &config.days {
        let name = solutions::day_name(day).with_context(|| format!("no name for day {day}"))?;
        let path = config.input_path(day);

        let Some(input) = read_input(&path)? else {
            log::warn!("skipping day {day}, input file missing: {}", path.display());
            output.day_skipped(name, &path);
            continue;
        };

        solutions::run_day(day, &input, &mut output).map_err(|dyn_error| {
            Error::from_boxed(dyn_error).context(format!("failed to run solution for day {day}"))
        })?;
    }
    output.run_summary();

    Ok(())
}
