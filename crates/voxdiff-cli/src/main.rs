//! voxdiff: score every frame of a 4D NIfTI volume against frame 0.

mod cli;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use voxdiff_core::{VoxdiffConfig, VoxdiffErrorCode};

fn main() -> ExitCode {
    let matches = cli::command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let args = cli::parse_args(matches).map_err(coded)?;
    init_tracing(args.verbosity);

    let root = std::env::current_dir().context("cannot determine working directory")?;
    let config = VoxdiffConfig::load(&root, args.config.as_deref(), Some(&args.overrides))
        .map_err(coded)?;
    tracing::debug!(?config, "resolved configuration");

    let report = voxdiff_core::run(&args.input, &config).map_err(coded)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render(&report, args.output, &mut out)
}

/// Prefix the stable error code so scripts can match on it.
fn coded<E>(err: E) -> anyhow::Error
where
    E: std::error::Error + VoxdiffErrorCode + Send + Sync + 'static,
{
    let code = err.error_code();
    anyhow::Error::new(err).context(format!("[{}]", code))
}

/// Called once from `main`. Logs go to stderr; `VOXDIFF_LOG`
/// (e.g. `voxdiff_core=debug`) wins over `-v`.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("VOXDIFF_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1),
        )
        .with(filter)
        .init();
}
