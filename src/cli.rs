//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags left unset
//! fall back to the settings file, then to built-in defaults.

use crate::config::AppSettings;
use crate::scanner::{RetryPolicy, ScanRequest};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A fast concurrent TCP port scanner.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version, about = "Fast concurrent TCP port scanner", long_about = None)]
#[command(after_help = "Example - portsweep -s 20 -e 40000 -t 500 -V 192.168.1.2")]
pub struct Args {
    /// Host to scan
    #[arg(value_name = "IPv4")]
    pub target: String,

    /// Starting port
    #[arg(short = 's', long = "start", value_parser = clap::value_parser!(u16).range(1..))]
    pub start: Option<u16>,

    /// Ending port
    #[arg(short = 'e', long = "end", value_parser = clap::value_parser!(u16).range(1..))]
    pub end: Option<u16>,

    /// Threads to use
    #[arg(short = 't', long = "threads", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Verbose output (show scanning progress)
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Connection timeout per attempt in milliseconds
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: Option<u64>,

    /// Attempts per port before a refused or silent port is given up on
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: Option<u32>,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Open-ports table
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Everything the binary needs to run one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub request: ScanRequest,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub format: OutputFormat,
}

impl ScanOptions {
    /// Default log filter when `RUST_LOG` is unset: engine progress at info in
    /// verbose mode, warnings only otherwise.
    pub fn log_filter(&self) -> &'static str {
        if self.request.verbose() {
            "warn,portsweep=info"
        } else {
            "warn"
        }
    }
}

/// The full command, with `-v` as the version flag so `-V` stays free for
/// verbose mode.
pub fn command() -> Command {
    Args::command().disable_version_flag(true).arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Display version"),
    )
}

/// Parse the process arguments, exiting with usage on error.
pub fn parse_args() -> Args {
    try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Parse arguments from an iterator.
pub fn try_parse_from<I, T>(itr: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(itr)?;
    Args::from_arg_matches(&matches)
}

impl Args {
    /// Merge flags with `settings` and validate the result.
    pub fn resolve(&self, settings: &AppSettings) -> Result<ScanOptions, clap::Error> {
        let start = self.start.unwrap_or(settings.default_start_port);
        let end = self.end.unwrap_or(settings.default_end_port);
        let threads = self.threads.unwrap_or(settings.default_threads);

        if start > end {
            return Err(usage_error(
                ErrorKind::ArgumentConflict,
                "Starting port must be less than or equal to the ending port.",
            ));
        }

        let request = ScanRequest::new(self.target.as_str(), start, end, threads)
            .map_err(|e| usage_error(ErrorKind::ValueValidation, e))?
            .with_verbose(self.verbose || settings.verbose);

        let format = match self.output {
            Some(format) => format,
            None => OutputFormat::from_str(&settings.default_output_format, true).map_err(|_| {
                usage_error(
                    ErrorKind::InvalidValue,
                    format!(
                        "unknown output format '{}' in settings",
                        settings.default_output_format
                    ),
                )
            })?,
        };

        Ok(ScanOptions {
            request,
            timeout: self
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| settings.timeout()),
            retry: RetryPolicy::new(self.retries.unwrap_or(settings.max_retries)),
            format,
        })
    }
}

fn usage_error(kind: ErrorKind, message: impl fmt::Display) -> clap::Error {
    command().error(kind, message)
}
