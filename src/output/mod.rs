//! Report rendering.
//!
//! Formatters for plain text, JSON, and CSV renditions of a completed
//! sweep, plus the streaming discovery lines printed while it runs.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{print_error, print_info, print_open_port, print_sweep_header};

use crate::cli::OutputFormat;
use crate::sweep::SweepReport;
use std::io;

/// Render the final sweep report in the requested format.
pub fn print_report(report: &SweepReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(report),
        OutputFormat::Json => json_format::print_json(report),
        OutputFormat::Csv => csv_format::print_csv(report),
    }
}
