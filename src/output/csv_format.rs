//! CSV output formatting.

use crate::sweep::SweepReport;
use std::io;

/// Print the sweep report in CSV format, one row per open port.
pub fn print_csv(report: &SweepReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["address", "hostname", "port", "service"])?;

    for host in &report.hosts {
        for open in &host.open_ports {
            wtr.write_record([
                &host.addr.to_string(),
                host.hostname.as_deref().unwrap_or(""),
                &open.port.to_string(),
                open.service,
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
