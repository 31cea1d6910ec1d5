pub mod handle_command;
pub mod inspect_command;

pub use self::{handle_command::*, inspect_command::*};

use clap::ArgMatches;
use std::path::PathBuf;

fn required_path(matches: &ArgMatches, name: &str) -> Result<PathBuf, String> {
    matches
        .value_of(name)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing required argument: {}", name))
}
