//! JSON output formatting.

use crate::sweep::SweepReport;
use std::io;

/// Print the sweep report in JSON format.
pub fn print_json(report: &SweepReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
