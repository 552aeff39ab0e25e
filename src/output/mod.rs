//! Output formatting module.
//!
//! Renders a finished scan as plain text, JSON or CSV.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, print_warning, write_plain};

use crate::cli::OutputFormat;
use crate::scanner::{ScanRequest, ScanResult};
use std::io::{self, Write};

/// Write scan results to `out` in the given format.
pub fn write_results<W: Write>(
    out: &mut W,
    request: &ScanRequest,
    result: &ScanResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, result),
        OutputFormat::Json => write_json(out, request, result),
        OutputFormat::Csv => write_csv(out, result),
    }
}

/// Print scan results to stdout in the given format.
pub fn print_results(
    request: &ScanRequest,
    result: &ScanResult,
    format: OutputFormat,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, request, result, format)?;
    out.flush()
}
