//! Trawl binary entry point.
//!
//! Wires the settings file, interface discovery, range derivation, and
//! the sweep together. Only configuration problems exit non-zero; a
//! completed sweep exits 0 whatever it found.

use anyhow::Context;
use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use trawl::cli::{Args, OutputFormat};
use trawl::config::AppSettings;
use trawl::error::ConfigError;
use trawl::resolve::DnsProber;
use trawl::types::SubnetRange;
use trawl::{iface, output, sweep};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        output::print_error(&format!("{e:#}"));
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = match &args.config {
        // --save-defaults may target a file that does not exist yet
        Some(path) if args.save_defaults && !path.exists() => AppSettings::default(),
        Some(path) => AppSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AppSettings::load().context("failed to load settings")?,
    };

    if args.save_defaults {
        let merged = args.merged_settings(&settings);
        match &args.config {
            Some(path) => merged.save_to(path)?,
            None => merged.save()?,
        }
        output::print_info("Defaults saved");
        return Ok(());
    }

    let format = args.output_format(&settings);
    let config = args
        .scan_config(&settings)
        .context("invalid sweep configuration")?;

    let local = iface::discover(args.interface.as_deref())?;
    let range = SubnetRange::from_ip_mask(local.addr, local.mask)
        .map_err(ConfigError::from)
        .with_context(|| format!("interface {} has an unusable mask", local.interface))?;

    if !args.quiet && format == OutputFormat::Plain {
        output::print_sweep_header(&local, &range, &config);
    }

    let resolver = Arc::new(DnsProber::new());
    let report = sweep::run_sweep(&local.interface, range, config, resolver).await;

    output::print_report(&report, format)?;

    Ok(())
}

/// Logging goes to stderr so structured stdout output stays clean.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "trawl=debug" } else { "trawl=warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
