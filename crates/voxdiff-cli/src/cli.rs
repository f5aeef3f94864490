//! Argument parsing.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use voxdiff_core::errors::ConfigError;
use voxdiff_core::{CliOverrides, OffsetPolicy, Strategy};

use crate::output::OutputMode;

/// Everything the command line asked for.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: CliOverrides,
    pub output: OutputMode,
    pub verbosity: u8,
}

pub fn command() -> Command {
    Command::new("voxdiff")
        .about("Sum of squared differences between the first frame of a 4D NIfTI volume and every later frame")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("INPUT_PATH")
                .help("Sets input nifti file (.nii)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("CONFIG_PATH")
                .help("TOML config file (default: ./voxdiff.toml if present)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .help("Loop strategy")
                .value_parser(["flattened", "nested", "parallel"]),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('j')
                .help("Worker threads for the parallel strategy (0 = all cores)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("offset-policy")
                .long("offset-policy")
                .help("How to locate voxel data in the file")
                .value_parser(["validated", "header", "trailing"]),
        )
        .arg(
            Arg::new("repeat")
                .long("repeat")
                .short('n')
                .help("Repeat the scoring pass N times and report timing")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .short('a')
                .help("Print every score, not just the first and last")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full report as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

pub fn parse_args(matches: &ArgMatches) -> Result<CliArgs, ConfigError> {
    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .ok_or_else(|| ConfigError::ValidationFailed {
            field: "input".to_string(),
            message: "an input file is required".to_string(),
        })?;

    let overrides = CliOverrides {
        strategy: matches
            .get_one::<String>("strategy")
            .map(|s| s.parse::<Strategy>())
            .transpose()?,
        threads: matches.get_one::<usize>("threads").copied(),
        repeat: matches.get_one::<u32>("repeat").copied(),
        offset_policy: matches
            .get_one::<String>("offset-policy")
            .map(|s| s.parse::<OffsetPolicy>())
            .transpose()?,
    };

    let output = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("all") {
        OutputMode::All
    } else {
        OutputMode::Summary
    };

    Ok(CliArgs {
        input,
        config: matches.get_one::<PathBuf>("config").cloned(),
        overrides,
        output,
        verbosity: matches.get_count("verbose"),
    })
}
