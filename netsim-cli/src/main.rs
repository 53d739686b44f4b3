//! `netsim` binary.
//!
//! Builds a random network from command-line options and prints its summary
//! on stdout. Diagnostics go through `tracing` to stderr; a failed run exits
//! non-zero after logging the error and, for rejected sampler settings, its
//! stable code.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use netsim_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use netsim_core::SamplerErrorCode;
use tracing::{error, field};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_failure(&err);
        return ExitCode::FAILURE;
    }

    match execute(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = sampler_code(&err).map(|code| field::display(code.as_str()));
            error!(error = %err, code, "netsim run failed");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let summary = run_cli(cli).context("network run failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("could not write summary")?;
    out.flush().context("could not flush stdout")
}

fn sampler_code(err: &anyhow::Error) -> Option<SamplerErrorCode> {
    match err.downcast_ref::<CliError>()? {
        CliError::Sampler(sampler) => Some(sampler.code()),
        _ => None,
    }
}

#[expect(
    clippy::print_stderr,
    reason = "no subscriber is installed yet to carry this message"
)]
fn report_logging_failure(err: &LoggingError) {
    eprintln!("netsim: logging setup failed: {err}");
}
