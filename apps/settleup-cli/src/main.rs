//! # settleup
//!
//! Prints the settlement summary for an exported event snapshot.
//!
//! ```text
//! settleup <SNAPSHOT.json> [--config PATH] [--format text|json]
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging (stderr, RUST_LOG, default settleup=info)       │
//! │  2. Parse Arguments                                                    │
//! │  3. Load Config (defaults → settleup.toml → SETTLEUP_* → --format)     │
//! │  4. Load Snapshot (event + expenses, event validated)                  │
//! │  5. summarize_with ──► text report or JSON on stdout                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod report;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use settleup_core::summarize_with;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::report::Report;
use crate::snapshot::Snapshot;

const USAGE: &str = "Usage: settleup <SNAPSHOT.json> [--config PATH] [--format text|json]";

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq)]
struct Args {
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> CliResult<Self> {
        let mut parsed = Args::default();
        let mut snapshot = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-c" | "--config" => {
                    let value = args.next().ok_or_else(|| missing_value(&arg))?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "-f" | "--format" => {
                    let value = args.next().ok_or_else(|| missing_value(&arg))?;
                    let format = value
                        .parse()
                        .map_err(|e: CliError| CliError::InvalidArgs(e.to_string()))?;
                    parsed.format = Some(format);
                }
                flag if flag.starts_with('-') => {
                    return Err(CliError::InvalidArgs(format!("Unknown option '{}'", flag)));
                }
                path => {
                    if snapshot.is_some() {
                        return Err(CliError::InvalidArgs(format!(
                            "Unexpected extra argument '{}'",
                            path
                        )));
                    }
                    snapshot = Some(PathBuf::from(path));
                }
            }
        }

        if parsed.help {
            return Ok(parsed);
        }
        parsed.snapshot = snapshot
            .ok_or_else(|| CliError::InvalidArgs("Missing snapshot file".to_string()))?;
        Ok(parsed)
    }
}

fn missing_value(flag: &str) -> CliError {
    CliError::InvalidArgs(format!("Option '{}' needs a value", flag))
}

fn main() -> ExitCode {
    init_tracing();

    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// The single stderr message for a failed run; usage mistakes get the
/// usage line appended.
fn failure_message(e: &CliError) -> String {
    let mut message = format!("settleup: {}", e);
    if matches!(e, CliError::InvalidArgs(_)) {
        message.push('\n');
        message.push_str(USAGE);
    }
    message
}

fn run(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let args = Args::parse(args)?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = CliConfig::load(args.config)?;
    if let Some(format) = args.format {
        config.output.format = format;
    }
    info!(
        tolerance = %config.settlement.tolerance,
        format = %config.output.format,
        "Configuration loaded"
    );

    let snapshot = Snapshot::load(&args.snapshot)?;
    let summary = summarize_with(&snapshot.event, &snapshot.expenses, &config.settlement)?;

    match config.output.format {
        OutputFormat::Text => print!("{}", Report::new(&snapshot.event, &summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for the report.
///
/// ## Log Levels
/// - `RUST_LOG=settleup_core=debug` - Show every calculation step
/// - Default: INFO for the settleup crates, WARN elsewhere
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,settleup=info,settleup_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
