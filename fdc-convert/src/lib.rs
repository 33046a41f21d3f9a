//! Conversion Orchestrator for FDC NEO fault logs.
//!
//! Wraps the codecs and merge engine in four file-to-file operations:
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`Converter::online_to_offline`] | online hex text | offline dump |
//! | [`Converter::offline_to_online`] | offline dump | online hex text, newest first |
//! | [`Converter::merge_to_online`] | online + offline | online hex text |
//! | [`Converter::merge_to_offline`] | online + offline | offline dump |
//!
//! Every operation returns a [`ConversionResult`]; failures are reported in
//! the result instead of being propagated.
//!
//! ```ignore
//! use fdc_convert::{Converter, ConverterConfig};
//!
//! let converter = Converter::new(ConverterConfig::default());
//! let result = converter.merge_to_online(online.as_ref(), offline.as_ref(), None);
//! println!("{}", result.message);
//! ```

mod config;
mod converter;
mod error;
pub mod naming;
mod result;

pub use config::{
    CONFIG_FILE_NAME, ConfigError, ConverterConfig, DeviceSection, InputSection, OnlineSection,
    OutputSection,
};
pub use converter::Converter;
pub use error::{ConvertError, ErrorKind};
pub use result::{ConversionResult, Operation, SourceCounts};
