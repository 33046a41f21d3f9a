//! To-online command - offline dump -> online upload

use std::path::PathBuf;

use clap::Args;
use fdc_codec::Clock;
use fdc_convert::{ConversionResult, Converter};

/// Arguments for the to-online command
#[derive(Args)]
pub struct ToOnlineArgs {
    /// Offline dump, e.g. Fault_WBVF_S100.txt
    pub input: PathBuf,

    /// Output file (default: <prefix>_FULL_<site>_<timestamp>.txt beside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the to-online command
pub fn execute<C: Clock>(converter: &Converter<C>, args: ToOnlineArgs) -> ConversionResult {
    converter.offline_to_online(&args.input, args.output.as_deref())
}
