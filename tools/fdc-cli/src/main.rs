//! fdc - FDC NEO fault-log converter
//!
//! # Commands
//!
//! - `fdc to-offline` - Convert an online upload into an offline dump
//! - `fdc to-online` - Convert an offline dump into online text
//! - `fdc merge` - Merge an online upload with an offline dump
//! - `fdc inspect` - List the records found in any container
//!
//! # Usage
//!
//! ```bash
//! # Online upload -> Fault_GT_N24987L02.txt next to the input
//! fdc to-offline GT_N24987L02_260107_091837.txt
//!
//! # Merge both sources into one offline dump for a WBVF unit
//! fdc merge WB_S100_260107_091837.txt Fault_WBVF_S100.txt --format offline --device wbvf
//!
//! # Machine-readable result
//! fdc --json to-online Fault_WBVF_S100.txt
//! ```
//!
//! Settings are read from `--config <file>`, else `./fdc.toml`, else defaults.
//! Logs go to stderr; `RUST_LOG` overrides the level.

mod config;
mod inspect;
mod merge;
mod report;
mod to_offline;
mod to_online;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fdc_convert::Converter;

/// fdc - FDC NEO fault-log converter
#[derive(Parser)]
#[command(name = "fdc")]
#[command(about = "Convert and merge FDC NEO online/offline fault logs")]
#[command(version)]
struct Cli {
    /// Config file (default: ./fdc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an online upload (hex text) into an offline dump
    ToOffline(to_offline::ToOfflineArgs),

    /// Convert an offline dump into online hex text, newest record first
    ToOnline(to_online::ToOnlineArgs),

    /// Merge an online upload with an offline dump, dropping duplicates
    Merge(merge::MergeArgs),

    /// List the records found in a container
    Inspect(inspect::InspectArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref())?;
    let converter = Converter::new(config);

    let result = match cli.command {
        Commands::ToOffline(args) => to_offline::execute(&converter, args),
        Commands::ToOnline(args) => to_online::execute(&converter, args),
        Commands::Merge(args) => merge::execute(&converter, args),
        Commands::Inspect(args) => {
            inspect::execute(converter.config(), args, cli.json)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    report::print(&result, cli.json)?;
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
