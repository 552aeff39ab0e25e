//! CSV output formatting.

use crate::scanner::ScanResult;
use std::io::{self, Write};

/// Write results in CSV format, one row per open port.
pub fn write_csv<W: Write>(out: &mut W, result: &ScanResult) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["port", "state", "service"])?;

    for record in result.records() {
        wtr.write_record([record.port.to_string().as_str(), "open", &record.service])?;
    }

    wtr.flush()?;
    Ok(())
}
