//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::iface::LocalNet;
use crate::sweep::{ScanConfig, SweepReport};
use crate::types::SubnetRange;
use console::style;
use std::io::{self, Write};
use std::net::Ipv4Addr;

/// Print a header before the sweep begins.
pub fn print_sweep_header(local: &LocalNet, range: &SubnetRange, config: &ScanConfig) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("Trawl").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Local IP: {} ({})",
        style("•").dim(),
        style(local.addr).white().bold(),
        local.interface
    );
    println!(
        "{} Network: {} (mask {})",
        style("•").dim(),
        style(range.to_string()).yellow(),
        range.mask()
    );
    println!(
        "{} Probing ports {} on {} candidates...",
        style("•").dim(),
        style(config.ports).white().bold(),
        style(range.host_count()).white().bold()
    );
    println!();
}

/// The streaming per-discovery line in plain mode.
fn open_port_line(hostname: Option<&str>, addr: Ipv4Addr, port: u16) -> String {
    format!(
        "Host: {} (IP: {}) - Port {} is open",
        hostname.unwrap_or("Unknown"),
        addr,
        port
    )
}

/// Announce an open port as it is discovered.
pub fn print_open_port(hostname: Option<&str>, addr: Ipv4Addr, port: u16) {
    println!("{}", open_port_line(hostname, addr, port));
}

/// Print the completed sweep in human-readable plain text format.
pub fn print_plain(report: &SweepReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let bar = "═══════════════════════════════════════════════════════════════";
    let rule = "───────────────────────────────────────────────────────────────";

    // Header
    writeln!(out)?;
    writeln!(out, "{}", style(bar).cyan())?;
    writeln!(
        out,
        "                    {} Sweep Results",
        style("Trawl").cyan().bold()
    )?;
    writeln!(out, "{}", style(bar).cyan())?;
    writeln!(out)?;

    // Sweep info
    writeln!(
        out,
        "  {} {}",
        style("Interface:").bold(),
        report.interface
    )?;
    writeln!(
        out,
        "  {} {}/{} (broadcast {})",
        style("Network:").bold(),
        report.network,
        report.prefix,
        report.broadcast
    )?;
    writeln!(
        out,
        "  {} {} candidates, {} ports each",
        style("Swept:").bold(),
        report.candidates,
        report.ports_per_host
    )?;
    writeln!(out)?;

    // Statistics
    writeln!(
        out,
        "  {} completed in {:.2}s",
        style("Statistics:").bold(),
        report.duration_ms as f64 / 1000.0
    )?;
    writeln!(
        out,
        "               {} open, {} closed, {} filtered",
        style(report.open_ports).green().bold(),
        style(report.closed_ports).red(),
        style(report.filtered_ports).yellow()
    )?;
    if report.skipped_hosts > 0 {
        writeln!(
            out,
            "               {} hosts not recorded (list full)",
            style(report.skipped_hosts).yellow()
        )?;
    }
    writeln!(out)?;

    // Discovered hosts
    writeln!(out, "  {}", style("Discovered Hosts:").bold())?;
    if report.discovered.is_empty() {
        writeln!(out, "  {}", style("No hosts resolved.").dim())?;
    } else {
        for host in &report.discovered {
            writeln!(
                out,
                "  Hostname: {}, IP: {}",
                style(host.display_name()).white().bold(),
                host.addr
            )?;
        }
    }
    writeln!(out)?;

    // Per-host open ports
    if report.hosts.is_empty() {
        writeln!(out, "  {}", style("No ports to display.").dim())?;
    } else {
        writeln!(out, "  {}", style(rule).dim())?;
        writeln!(
            out,
            "  {:<16}  {:<24}  {:>6}  {}",
            style("ADDRESS").bold(),
            style("HOSTNAME").bold(),
            style("PORT").bold(),
            style("SERVICE").bold()
        )?;
        writeln!(out, "  {}", style(rule).dim())?;

        for host in &report.hosts {
            let name = host.hostname.as_deref().unwrap_or("Unknown");
            if host.open_ports.is_empty() {
                writeln!(
                    out,
                    "  {:<16}  {:<24}  {:>6}  {}",
                    host.addr,
                    name,
                    style("-").dim(),
                    style(format!(
                        "no open ports ({} closed, {} filtered)",
                        host.closed, host.filtered
                    ))
                    .dim()
                )?;
                continue;
            }
            for open in &host.open_ports {
                writeln!(
                    out,
                    "  {:<16}  {:<24}  {:>6}  {}",
                    host.addr,
                    name,
                    style(open.port).green().bold(),
                    open.service
                )?;
            }
        }

        writeln!(out, "  {}", style(rule).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(bar).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
