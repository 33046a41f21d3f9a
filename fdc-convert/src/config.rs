//! Converter configuration (`fdc.toml`)
//!
//! ```toml
//! [input]
//! max_bytes = 8388608
//!
//! [output]
//! dir = "converted"
//!
//! [device]
//! default_class = "WBVF"   # or "GT"
//!
//! [online]
//! legacy_cap = false
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use fdc_codec::OnlineLimit;
use fdc_shared::{DEFAULT_MAX_INPUT_BYTES, DeviceClass};
use serde::Deserialize;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "fdc.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fdc.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Converter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub device: DeviceSection,
    #[serde(default)]
    pub online: OnlineSection,
}

/// Input limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSection {
    /// Largest input file accepted, in bytes.
    /// Default: 8 MiB
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_INPUT_BYTES
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

/// Where auto-named outputs go
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputSection {
    /// Output directory. Default: next to the primary input file
    pub dir: Option<PathBuf>,
}

/// Device class fallback
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceSection {
    /// Used when no hint is given and no input name contains "GT".
    /// Default: WBVF
    #[serde(default)]
    pub default_class: DeviceClass,
}

/// Online output policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OnlineSection {
    /// Truncate online outputs to one legacy transmission (518 bytes).
    /// Default: false
    #[serde(default)]
    pub legacy_cap: bool,
}

impl ConverterConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn online_limit(&self) -> OnlineLimit {
        if self.online.legacy_cap {
            OnlineLimit::Legacy
        } else {
            OnlineLimit::Unbounded
        }
    }
}
