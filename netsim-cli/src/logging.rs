//! Global `tracing` setup for the `netsim` binary.
//!
//! Events are written to stderr, leaving stdout for the run summary.
//! `RUST_LOG` filters them (`info` when unset) and `NETSIM_LOG_FORMAT`
//! chooses between `human` and `json` lines. Records emitted through the
//! `log` facade are forwarded into the same subscriber.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

const LOG_FORMAT_ENV: &str = "NETSIM_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Line format written by the installed subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// Newline-delimited JSON with span context.
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }

    fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }
}

/// Failure to set up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable was set but is not UTF-8.
    #[error("`{name}` is not valid UTF-8: {source}")]
    InvalidUnicode {
        /// Variable that was read.
        name: &'static str,
        /// Error from the environment lookup.
        #[source]
        source: env::VarError,
    },
    /// The format variable named neither `human` nor `json`.
    #[error("log format `{provided}` is not one of `human`, `json`")]
    UnsupportedFormat {
        /// Trimmed, lower-cased value that was rejected.
        provided: String,
    },
}

/// Installs the netsim subscriber once per process.
///
/// Later calls return immediately. A subscriber installed by someone else
/// stays in place and a note is written to stderr.
///
/// # Errors
/// Returns [`LoggingError`] when `NETSIM_LOG_FORMAT` is unreadable or names
/// an unknown format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let format = LogFormat::from_env()?;
    if let Err(err) = install(format) {
        note_foreign_subscriber(&err);
    }
    let _ = INSTALLED.set(());
    Ok(())
}

fn install(format: LogFormat) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Human => base.boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // A `log` logger may already be registered; keep it if so.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
}

#[expect(
    clippy::print_stderr,
    reason = "the global dispatcher belongs to another subscriber"
)]
fn note_foreign_subscriber(err: &TryInitError) {
    eprintln!("netsim: keeping existing tracing subscriber: {err}");
}
