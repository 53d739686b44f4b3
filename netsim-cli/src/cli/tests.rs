//! Unit tests for the CLI commands and the values loader.

use super::commands::{load_values, run_command};
use super::{Cli, CliError, Command, ExecutionSummary, RunCommand, SamplerArgs, render_summary, run_cli};

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use netsim_core::{SamplerConfig, SamplerErrorCode};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use netsim_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn seeded_run() -> RunCommand {
    RunCommand {
        nodes: 12,
        mean_degree: 2.5,
        seed: Some(11),
        sampler: SamplerArgs::default(),
        values: None,
        top: 4,
    }
}

#[rstest]
fn clap_applies_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["netsim", "run"])?;
    let Command::Run(run) = cli.command;
    assert_eq!(run.nodes, 100);
    assert!((run.mean_degree - 4.0).abs() < f64::EPSILON);
    assert_eq!(run.seed, None);
    assert_eq!(run.values, None);
    assert_eq!(run.top, 10);
    assert!((run.sampler.normal_std_dev - 1.0).abs() < f64::EPSILON);
    assert!((run.sampler.uniform_high - 1.0).abs() < f64::EPSILON);
    Ok(())
}

#[rstest]
fn clap_sampler_defaults_match_library_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["netsim", "run"])?;
    let Command::Run(run) = cli.command;
    let config = SamplerConfig::default();
    for parsed in [&run.sampler, &SamplerArgs::default()] {
        assert_eq!(parsed.normal_mean.to_bits(), config.normal_mean().to_bits());
        assert_eq!(parsed.normal_std_dev.to_bits(), config.normal_std_dev().to_bits());
        assert_eq!(
            (parsed.uniform_low.to_bits(), parsed.uniform_high.to_bits()),
            (config.uniform_range().0.to_bits(), config.uniform_range().1.to_bits())
        );
    }
    Ok(())
}

#[rstest]
fn clap_accepts_negative_distribution_parameters() -> TestResult {
    let cli = Cli::try_parse_from([
        "netsim",
        "run",
        "--nodes",
        "30",
        "--seed",
        "9",
        "--normal-mean",
        "-2.5",
        "--uniform-low",
        "-1",
        "--uniform-high",
        "1",
        "--values",
        "values.txt",
    ])?;
    let Command::Run(run) = cli.command;
    assert_eq!(run.nodes, 30);
    assert_eq!(run.seed, Some(9));
    assert!((run.sampler.normal_mean + 2.5).abs() < f64::EPSILON);
    assert!((run.sampler.uniform_low + 1.0).abs() < f64::EPSILON);
    assert_eq!(run.values, Some(PathBuf::from("values.txt")));
    Ok(())
}

#[rstest]
#[case::non_numeric_nodes(&["netsim", "run", "--nodes", "many"])]
#[case::negative_nodes(&["netsim", "run", "--nodes", "-3"])]
#[case::unknown_flag(&["netsim", "run", "--edges", "3"])]
#[case::missing_command(&["netsim"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_cli_summarises_network(seeded_run: RunCommand) -> TestResult {
    let summary = run_cli(Cli {
        command: Command::Run(seeded_run),
    })?;

    assert_eq!(summary.nodes, 12);
    assert_eq!(summary.values_loaded, None);
    assert_eq!(summary.top_values.len(), 4);
    assert!(
        summary
            .top_values
            .windows(2)
            .all(|pair| pair[0] >= pair[1])
    );
    let counted: usize = summary.degree_histogram.iter().map(|(_, count)| count).sum();
    assert_eq!(counted, 12);
    let degree_total: usize = summary
        .degree_histogram
        .iter()
        .map(|(degree, count)| degree * count)
        .sum();
    assert_eq!(degree_total, 2 * summary.links);
    assert!(
        summary
            .degree_histogram
            .windows(2)
            .all(|pair| pair[0].0 < pair[1].0)
    );
    Ok(())
}

#[rstest]
fn seeded_runs_are_reproducible(seeded_run: RunCommand) -> TestResult {
    let first = run_command(seeded_run.clone())?;
    let second = run_command(seeded_run)?;
    assert_eq!(first, second);
    Ok(())
}

#[rstest]
fn empty_network_reports_no_links(mut seeded_run: RunCommand) -> TestResult {
    seeded_run.nodes = 0;
    let summary = run_command(seeded_run)?;
    assert_eq!(summary.links, 0);
    assert!(summary.degree_histogram.is_empty());
    assert!(summary.top_values.is_empty());
    assert!(summary.mean_degree().abs() < f64::EPSILON);
    Ok(())
}

#[rstest]
fn huge_mean_degree_completes(mut seeded_run: RunCommand) -> TestResult {
    seeded_run.mean_degree = f64::MAX;
    let summary = run_command(seeded_run)?;
    assert!(summary.links <= 12 * 11 / 2);
    Ok(())
}

#[rstest]
fn values_file_overrides_leading_nodes(mut seeded_run: RunCommand) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "values.txt", "3.5\n# header\n\n-1\n 2 \n")?;
    seeded_run.nodes = 5;
    seeded_run.top = 5;
    seeded_run.values = Some(path);
    seeded_run.sampler.normal_std_dev = 0.0;

    let summary = run_command(seeded_run)?;

    assert_eq!(summary.values_loaded, Some(3));
    assert_eq!(summary.top_values, vec![3.5, 2.0, 0.0, 0.0, -1.0]);
    Ok(())
}

#[rstest]
fn values_file_longer_than_network_is_truncated(mut seeded_run: RunCommand) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "values.txt", "1\n2\n3\n4\n")?;
    seeded_run.nodes = 2;
    seeded_run.values = Some(path);

    let summary = run_command(seeded_run)?;

    assert_eq!(summary.values_loaded, Some(2));
    assert_eq!(summary.top_values, vec![2.0, 1.0]);
    Ok(())
}

#[rstest]
fn load_values_reports_malformed_line() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "values.txt", "1.0\n\nabc\n")?;

    let err = load_values(&path).expect_err("non-numeric line must fail");

    match err {
        CliError::InvalidValue {
            path: reported,
            line,
            raw,
        } => {
            assert_eq!(reported, path);
            assert_eq!(line, 3);
            assert_eq!(raw, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
#[case::negative_std_dev(SamplerArgs { normal_std_dev: -1.0, ..SamplerArgs::default() }, SamplerErrorCode::InvalidNormal)]
#[case::inverted_uniform(SamplerArgs { uniform_low: 2.0, uniform_high: 1.0, ..SamplerArgs::default() }, SamplerErrorCode::InvalidUniformRange)]
#[case::overflowing_uniform_width(SamplerArgs { uniform_low: -1e308, uniform_high: 1e308, ..SamplerArgs::default() }, SamplerErrorCode::InvalidUniformRange)]
fn run_cli_rejects_invalid_sampler(
    mut seeded_run: RunCommand,
    #[case] sampler: SamplerArgs,
    #[case] expected: SamplerErrorCode,
) {
    seeded_run.sampler = sampler;
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Run(seeded_run),
        },
        "invalid sampler parameters must fail",
    );
    match err {
        CliError::Sampler(sampler) => assert_eq!(sampler.code(), expected),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn render_summary_lists_histogram_and_top_values() -> TestResult {
    let summary = ExecutionSummary {
        nodes: 4,
        links: 3,
        values_loaded: Some(2),
        degree_histogram: vec![(1, 2), (2, 2)],
        top_values: vec![0.75, -0.5],
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "nodes: 4\nlinks: 3\nmean degree: 1.50\nvalues loaded: 2\n\
         degree histogram:\n1\t2\n2\t2\ntop values:\n1\t0.75\n2\t-0.5\n"
    );
    Ok(())
}

#[rstest]
fn run_command_emits_tracing_fields(seeded_run: RunCommand) -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || run_command(seeded_run))?;

    let execute = layer
        .span_named("cli.execute")
        .expect("cli.execute span must exist");
    assert_eq!(execute.fields.get("nodes"), Some(&"12".to_owned()));
    assert_eq!(execute.fields.get("mean_degree"), Some(&"2.5".to_owned()));
    assert_eq!(execute.fields.get("seeded"), Some(&"true".to_owned()));

    let connect = layer
        .span_named("network.random_connect")
        .expect("random_connect span must exist");
    assert_eq!(connect.fields.get("links"), Some(&summary.links.to_string()));

    assert!(layer.events().iter().any(|event| {
        event.level == Level::INFO
            && event.message() == Some("command completed")
            && event.fields.get("links") == Some(&summary.links.to_string())
    }));
    Ok(())
}

#[rstest]
fn load_values_records_path_on_error(mut seeded_run: RunCommand) {
    let dir = temp_dir();
    seeded_run.values = Some(dir.path().join("missing.txt"));
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || run_command(seeded_run))
        .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));

    let span = layer
        .span_named("cli.load_values")
        .expect("load_values span must exist");
    assert!(
        span.fields
            .get("path")
            .is_some_and(|value| value.ends_with("missing.txt"))
    );
    assert_eq!(span.fields.get("count"), None);
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
