//! Command-line interface definitions for Trawl.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags
//! left unset fall back to the settings file, which falls back to the
//! built-in defaults.

use crate::config::AppSettings;
use crate::sweep::ScanConfig;
use crate::types::{PortError, PortRange};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Sweep the local IPv4 subnet for reachable hosts and open TCP ports.
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An asynchronous IPv4 subnet sweeper and port discovery tool", long_about = None)]
pub struct Args {
    /// Network interface to sweep from (auto-selected when omitted)
    #[arg(short = 'i', long)]
    pub interface: Option<String>,

    /// Ports to probe on every candidate (e.g., "80", "1-1024")
    #[arg(short, long)]
    pub ports: Option<PortRange>,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Maximum concurrent connection attempts per host
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Number of candidate addresses swept at once
    #[arg(long = "host-concurrency")]
    pub host_concurrency: Option<usize>,

    /// Maximum number of discovered hosts recorded per sweep
    #[arg(long = "max-hosts")]
    pub max_hosts: Option<usize>,

    /// Rate limit in connection attempts per second (0 = unlimited)
    #[arg(short = 'r', long = "rate")]
    pub rate_limit: Option<u32>,

    /// Output format for the final report
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Keep every scanned candidate in the report, not just the live ones
    #[arg(long)]
    pub show_closed: bool,

    /// Verbose output (show sweep progress)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the header and streaming discovery lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the resolved defaults to the settings file and exit
    #[arg(long)]
    pub save_defaults: bool,
}

impl Args {
    /// Resolve the report format from flags and settings.
    pub fn output_format(&self, settings: &AppSettings) -> OutputFormat {
        self.output.unwrap_or_else(|| {
            OutputFormat::from_str(&settings.default_output_format, true).unwrap_or_default()
        })
    }

    /// Fold explicit flags back into a settings value, for
    /// `--save-defaults`.
    pub fn merged_settings(&self, base: &AppSettings) -> AppSettings {
        AppSettings {
            default_ports: self
                .ports
                .map(|p| p.to_string())
                .unwrap_or_else(|| base.default_ports.clone()),
            default_timeout_ms: self.timeout.unwrap_or(base.default_timeout_ms),
            default_concurrency: self.concurrency.unwrap_or(base.default_concurrency),
            default_host_concurrency: self
                .host_concurrency
                .unwrap_or(base.default_host_concurrency),
            default_max_hosts: self.max_hosts.unwrap_or(base.default_max_hosts),
            default_rate_limit: self.rate_limit.unwrap_or(base.default_rate_limit),
            default_output_format: self
                .output
                .map(|o| o.to_string())
                .unwrap_or_else(|| base.default_output_format.clone()),
            verbose: self.verbose || base.verbose,
        }
    }

    /// Build the sweep configuration, with explicit flags taking
    /// precedence over settings-file defaults.
    pub fn scan_config(&self, settings: &AppSettings) -> Result<ScanConfig, PortError> {
        let ports = match self.ports {
            Some(range) => range,
            None => settings.default_ports.parse()?,
        };

        // Streaming lines only belong in interactive plain output
        let announce = !self.quiet && self.output_format(settings) == OutputFormat::Plain;

        Ok(ScanConfig {
            ports,
            timeout: Duration::from_millis(self.timeout.unwrap_or(settings.default_timeout_ms)),
            concurrency: self.concurrency.unwrap_or(settings.default_concurrency),
            host_concurrency: self
                .host_concurrency
                .unwrap_or(settings.default_host_concurrency),
            max_hosts: self.max_hosts.unwrap_or(settings.default_max_hosts),
            rate_limit: self.rate_limit.unwrap_or(settings.default_rate_limit),
            show_closed: self.show_closed,
            announce,
            verbose: self.verbose || settings.verbose,
        })
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
