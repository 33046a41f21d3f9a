//! To-offline command - online upload -> offline dump

use std::path::PathBuf;

use clap::Args;
use fdc_codec::Clock;
use fdc_convert::{ConversionResult, Converter};
use fdc_shared::DeviceClass;

/// Arguments for the to-offline command
#[derive(Args)]
pub struct ToOfflineArgs {
    /// Online upload (hex text), e.g. GT_N24987L02_260107_091837.txt
    pub input: PathBuf,

    /// Output file (default: Fault_<class>_<site>.txt beside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Device class: gt or wbvf (default: from the file name, then config)
    #[arg(long)]
    pub device: Option<DeviceClass>,
}

/// Execute the to-offline command
pub fn execute<C: Clock>(converter: &Converter<C>, args: ToOfflineArgs) -> ConversionResult {
    converter.online_to_offline(&args.input, args.output.as_deref(), args.device)
}
