//! Command-line interface orchestration for netsim.
//!
//! The `run` command sizes a network, optionally overwrites its values from a
//! text file, connects it with Poisson degree targets and reports a summary.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, SamplerArgs, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
