//! Command implementations and argument parsing for the netsim CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use netsim_core::{Network, SamplerConfig, SamplerError, SeededSource};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_NODES: usize = 100;
const DEFAULT_MEAN_DEGREE: f64 = 4.0;
const DEFAULT_TOP: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "netsim", about = "Generate and summarise Poisson random networks.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a network, connect it randomly and print a summary.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of nodes in the network.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Mean of the Poisson degree distribution.
    #[arg(long = "mean-degree", default_value_t = DEFAULT_MEAN_DEGREE)]
    pub mean_degree: f64,

    /// Seed for reproducible runs (defaults to OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distribution parameters for node values.
    #[command(flatten)]
    pub sampler: SamplerArgs,

    /// UTF-8 file with one node value per line, applied after resizing.
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Number of largest node values to report.
    #[arg(long, default_value_t = DEFAULT_TOP)]
    pub top: usize,
}

/// Distribution parameters used when drawing node values.
#[derive(Debug, Args, Clone)]
pub struct SamplerArgs {
    /// Mean of the normal distribution used to populate the network.
    #[arg(
        long = "normal-mean",
        default_value_t = SamplerConfig::DEFAULT_NORMAL_MEAN,
        allow_negative_numbers = true
    )]
    pub normal_mean: f64,

    /// Standard deviation of the normal distribution.
    #[arg(
        long = "normal-std-dev",
        default_value_t = SamplerConfig::DEFAULT_NORMAL_STD_DEV,
        allow_negative_numbers = true
    )]
    pub normal_std_dev: f64,

    /// Inclusive lower bound for values of nodes added by growth.
    #[arg(
        long = "uniform-low",
        default_value_t = SamplerConfig::DEFAULT_UNIFORM_LOW,
        allow_negative_numbers = true
    )]
    pub uniform_low: f64,

    /// Exclusive upper bound for values of nodes added by growth.
    #[arg(
        long = "uniform-high",
        default_value_t = SamplerConfig::DEFAULT_UNIFORM_HIGH,
        allow_negative_numbers = true
    )]
    pub uniform_high: f64,
}

impl Default for SamplerArgs {
    fn default() -> Self {
        let config = SamplerConfig::default();
        let (uniform_low, uniform_high) = config.uniform_range();
        Self {
            normal_mean: config.normal_mean(),
            normal_std_dev: config.normal_std_dev(),
            uniform_low,
            uniform_high,
        }
    }
}

impl SamplerArgs {
    fn to_config(&self, seed: Option<u64>) -> SamplerConfig {
        let config = SamplerConfig::new()
            .with_normal(self.normal_mean, self.normal_std_dev)
            .with_uniform_range(self.uniform_low, self.uniform_high);
        match seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading node values.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the values file was not a number.
    #[error("`{path}` line {line}: `{raw}` is not a number")]
    InvalidValue {
        /// File containing the malformed line.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Offending text after trimming.
        raw: String,
    },
    /// Sampler configuration was rejected.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

/// Summarises the network produced by a CLI run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Node count after resizing.
    pub nodes: usize,
    /// Links created by random connection.
    pub links: usize,
    /// Number of values copied from `--values`, when supplied.
    pub values_loaded: Option<usize>,
    /// `(degree, node count)` pairs in ascending degree order.
    pub degree_histogram: Vec<(usize, usize)>,
    /// Largest node values in descending order.
    pub top_values: Vec<f64>,
}

impl ExecutionSummary {
    /// Average number of neighbours per node, or `0.0` for an empty network.
    #[must_use]
    pub fn mean_degree(&self) -> f64 {
        if self.nodes == 0 {
            return 0.0;
        }
        (2 * self.links) as f64 / self.nodes as f64
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the sampler configuration is invalid or the
/// values file cannot be read.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netsim_cli::cli::{Cli, Command, RunCommand, SamplerArgs, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         nodes: 20,
///         mean_degree: 2.0,
///         seed: Some(7),
///         sampler: SamplerArgs::default(),
///         values: None,
///         top: 3,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.nodes, 20);
/// assert_eq!(summary.top_values.len(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(nodes = command.nodes, mean_degree = command.mean_degree, seeded = command.seed.is_some()),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let mut source = SeededSource::new(&command.sampler.to_config(command.seed))?;
    let mut network = Network::new();
    network.resize(command.nodes, &mut source);

    let values_loaded = match command.values.as_deref() {
        Some(path) => Some(network.set_values(&load_values(path)?)),
        None => None,
    };

    let links = network.random_connect(command.mean_degree, &mut source);
    let summary = summarise(&network, links, values_loaded, command.top);
    info!(
        nodes = summary.nodes,
        links = summary.links,
        mean_degree = summary.mean_degree(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.load_values",
    err,
    skip(path),
    fields(path = field::Empty, count = field::Empty),
)]
pub(super) fn load_values(path: &Path) -> Result<Vec<f64>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut values = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value = trimmed.parse::<f64>().map_err(|_| CliError::InvalidValue {
            path: path.to_path_buf(),
            line: index + 1,
            raw: trimmed.to_owned(),
        })?;
        values.push(value);
    }
    span.record("count", values.len());
    Ok(values)
}

pub(super) fn summarise(
    network: &Network,
    links: usize,
    values_loaded: Option<usize>,
    top: usize,
) -> ExecutionSummary {
    let mut histogram = BTreeMap::new();
    for node in 0..network.size() {
        *histogram.entry(network.degree(node)).or_insert(0_usize) += 1;
    }
    let mut top_values = network.sorted_values();
    top_values.truncate(top);
    ExecutionSummary {
        nodes: network.size(),
        links,
        values_loaded,
        degree_histogram: histogram.into_iter().collect(),
        top_values,
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netsim_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     nodes: 2,
///     links: 1,
///     values_loaded: None,
///     degree_histogram: vec![(1, 2)],
///     top_values: vec![0.5],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("mean degree: 1.00"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "links: {}", summary.links)?;
    writeln!(writer, "mean degree: {:.2}", summary.mean_degree())?;
    if let Some(loaded) = summary.values_loaded {
        writeln!(writer, "values loaded: {loaded}")?;
    }
    writeln!(writer, "degree histogram:")?;
    for (degree, count) in &summary.degree_histogram {
        writeln!(writer, "{degree}\t{count}")?;
    }
    writeln!(writer, "top values:")?;
    for (rank, value) in summary.top_values.iter().enumerate() {
        writeln!(writer, "{}\t{value}", rank + 1)?;
    }
    Ok(())
}
