//! JSON output formatting.

use crate::scanner::{OpenPortRecord, ScanRequest, ScanResult};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    host: &'a str,
    start_port: u16,
    end_port: u16,
    open_ports: &'a [OpenPortRecord],
    elapsed_seconds: f64,
}

/// Write results as pretty-printed JSON.
pub fn write_json<W: Write>(
    out: &mut W,
    request: &ScanRequest,
    result: &ScanResult,
) -> io::Result<()> {
    let report = JsonReport {
        host: request.host(),
        start_port: request.start_port().as_u16(),
        end_port: request.end_port().as_u16(),
        open_ports: result.records(),
        elapsed_seconds: result.elapsed_seconds(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::other)?;
    writeln!(out)
}
