//! Device classes for FDC NEO monitoring units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Offline dump size for GT/GSP units (512 KiB)
pub const GT_CONTAINER_SIZE: usize = 512 * 1024;

/// Offline dump size for WBVF units (256 KiB)
pub const WBVF_CONTAINER_SIZE: usize = 256 * 1024;

/// Hardware family of the unit that produced (or will read) a dump.
///
/// The class decides the fixed size of an offline container and the
/// identifier written into its configuration header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    /// GT units, identified as "GSP" in the configuration header
    #[serde(rename = "GT")]
    Gt,
    /// WBVF units
    #[default]
    #[serde(rename = "WBVF")]
    Wbvf,
}

impl DeviceClass {
    /// Exact size in bytes of an offline container for this class.
    pub const fn container_size(self) -> usize {
        match self {
            DeviceClass::Gt => GT_CONTAINER_SIZE,
            DeviceClass::Wbvf => WBVF_CONTAINER_SIZE,
        }
    }

    /// Identifier bytes stored at offset 42 of the configuration header.
    pub const fn identifier(self) -> &'static [u8] {
        match self {
            DeviceClass::Gt => b"GSP",
            DeviceClass::Wbvf => b"WBVF",
        }
    }

    /// Guess the class from a file name.
    ///
    /// Only a `GT` substring is a positive signal; anything else is left to
    /// the caller's default.
    pub fn hinted_by(file_name: &str) -> Option<Self> {
        file_name.contains("GT").then_some(DeviceClass::Gt)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Gt => write!(f, "GT"),
            DeviceClass::Wbvf => write!(f, "WBVF"),
        }
    }
}

/// Error returned when a device class name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown device class: {0} (expected GT, GSP or WBVF)")]
pub struct ParseDeviceClassError(pub String);

impl FromStr for DeviceClass {
    type Err = ParseDeviceClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GT" | "GSP" => Ok(DeviceClass::Gt),
            "WBVF" | "WB" => Ok(DeviceClass::Wbvf),
            _ => Err(ParseDeviceClassError(s.to_string())),
        }
    }
}
