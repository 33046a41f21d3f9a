//! Merge command - online upload + offline dump -> one container

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use fdc_codec::Clock;
use fdc_convert::{ConversionResult, Converter};
use fdc_shared::DeviceClass;

/// Container written by a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergeFormat {
    /// Hex text (Merged_Online_<timestamp>.txt)
    #[default]
    Online,
    /// Fixed-size dump (Fault_<class>_Merged_<timestamp>.txt)
    Offline,
}

/// Arguments for the merge command
#[derive(Args)]
pub struct MergeArgs {
    /// Online upload (hex text)
    pub online: PathBuf,

    /// Offline dump
    pub offline: PathBuf,

    /// Container to write
    #[arg(long, value_enum, default_value_t = MergeFormat::Online)]
    pub format: MergeFormat,

    /// Output file (default: generated name beside the online input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Device class for offline output: gt or wbvf
    #[arg(long)]
    pub device: Option<DeviceClass>,
}

/// Execute the merge command
pub fn execute<C: Clock>(converter: &Converter<C>, args: MergeArgs) -> ConversionResult {
    let output = args.output.as_deref();
    match args.format {
        MergeFormat::Online => {
            if args.device.is_some() {
                tracing::warn!("--device only applies to offline output, ignoring it");
            }
            converter.merge_to_online(&args.online, &args.offline, output)
        }
        MergeFormat::Offline => {
            converter.merge_to_offline(&args.online, &args.offline, output, args.device)
        }
    }
}
