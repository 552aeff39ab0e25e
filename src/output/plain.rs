//! Plain text output formatting.
//!
//! Produces the open-ports table followed by the elapsed time.

use crate::scanner::ScanResult;
use console::style;
use std::io::{self, Write};

/// Write the open-ports table and elapsed time.
///
/// Records appear in the order workers found them.
pub fn write_plain<W: Write>(out: &mut W, result: &ScanResult) -> io::Result<()> {
    writeln!(out, "{:<10}{:<10}{:<20}", "PORT", "STATE", "SERVICE")?;

    for record in result.records() {
        writeln!(out, "{}/tcp  open      {}", record.port, record.service)?;
    }

    writeln!(out)?;
    writeln!(out, "Time Taken - {:.2} seconds", result.elapsed_seconds())?;
    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
